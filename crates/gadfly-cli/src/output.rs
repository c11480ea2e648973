//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use gadfly_coach::{ChallengeContext, OutcomeReport, RouteDecision};
use gadfly_domain::{
    AuditReport, AuditedFact, ChainResult, DomainProfile, DomainSummary, Fact, GraphStats,
};
use gadfly_gatekeeper::{ClaimReview, TriggerMatch};
use gadfly_janitor::JanitorMetrics;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format the result of rating an outcome.
    pub fn outcome(&self, report: &OutcomeReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(report);
        }
        let delta = format!("{:+.1}", report.update.delta);
        let delta = if report.update.delta >= 0.0 {
            self.colorize(&delta, "green")
        } else {
            self.colorize(&delta, "red")
        };
        let mut lines = vec![
            format!(
                "{} {} {} → rating {:.1} (rd {:.1}, expected {}%)",
                report.domain,
                report.outcome,
                delta,
                report.profile.rating,
                report.profile.rd,
                report.update.probability
            ),
            report.message.clone(),
        ];
        if report.tilt_detected {
            lines.push(self.warning("Losing streak detected"));
        }
        Ok(lines.join("\n"))
    }

    /// Format a challenge context.
    pub fn challenge(&self, context: &ChallengeContext) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(context);
        }
        let mut builder = Builder::default();
        builder.push_record(["Domain", "Rating", "RD", "Scaffold", "Style", "Flags"]);
        let mut flags = Vec::new();
        if context.first_blood {
            flags.push("first-blood");
        }
        if context.in_dead_zone {
            flags.push("dead-zone");
        }
        if context.tilt_detected {
            flags.push("tilt");
        }
        builder.push_record([
            context.domain.clone(),
            format!("{:.1}", context.rating),
            format!("{:.1}", context.rd),
            context.scaffold_level.as_str().to_string(),
            context.challenge_style.as_str().to_string(),
            flags.join(", "),
        ]);
        Ok(format!("{}\n\n{}", self.table(builder), context.instructions))
    }

    /// Format a single profile after a declaration.
    pub fn profile(&self, domain: &str, profile: &DomainProfile) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(profile);
        }
        Ok(self.success(&format!(
            "{} declared at {:.0} (rd {:.0} until it is demonstrated)",
            domain, profile.rating, profile.rd
        )))
    }

    /// Format a session start.
    pub fn session(&self, domains: usize) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(&serde_json::json!({ "domains": domains }));
        }
        Ok(self.success(&format!("Session started for {} domain(s)", domains)))
    }

    /// Format the domain summary.
    pub fn summary(&self, rows: &[DomainSummary]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(rows);
        }
        if rows.is_empty() {
            return Ok(self.colorize("No domains rated yet.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Domain", "Rating", "RD", "Trend", "Claims", "Sessions", "Last active"]);
        for row in rows {
            builder.push_record([
                row.domain.clone(),
                format!("{:.1}", row.rating),
                format!("{:.1}", row.rd),
                row.trend.as_str().to_string(),
                row.claims.to_string(),
                row.session_count.to_string(),
                row.last_active
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        Ok(self.table(builder))
    }

    /// Format a routing decision.
    pub fn route(&self, decision: &RouteDecision) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(decision);
        }
        Ok(match &decision.domain {
            Some(domain) => format!(
                "{} (strongest active domain: {} at {:.1})",
                decision.tier.as_str(),
                domain,
                decision.rating
            ),
            None => format!("{} (no active domain)", decision.tier.as_str()),
        })
    }

    /// Format a list of facts.
    pub fn facts(&self, facts: &[Fact]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(facts);
        }
        if facts.is_empty() {
            return Ok(self.colorize("No facts found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Domain", "Status", "Confidence", "Claim", "Expires"]);
        for fact in facts {
            builder.push_record([
                fact.id.to_string(),
                fact.domain.clone(),
                fact.status.to_string(),
                format!("{:.0}", fact.confidence),
                fact.claim.clone(),
                fact.expires_at
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_else(|| "never".to_string()),
            ]);
        }
        Ok(self.table(builder))
    }

    /// Format a reviewed and stored claim.
    pub fn fact_added(&self, review: &ClaimReview, fact: &Fact) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(&serde_json::json!({ "review": review, "fact": fact }));
        }
        let mut lines = Vec::new();
        match &review.verdict.reason {
            None => lines.push(self.success(&format!(
                "Stored {} as {} (tier {}, score {})",
                fact.id, fact.status, review.verdict.tier, review.verdict.score
            ))),
            Some(reason) => lines.push(self.warning(&format!(
                "Stored {} as {}: {}",
                fact.id, fact.status, reason
            ))),
        }
        lines.extend(self.trigger_lines(&review.triggers));
        Ok(lines.join("\n"))
    }

    /// Format an audit report.
    pub fn audit(&self, report: &AuditReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(report);
        }
        let mut lines = vec![format!(
            "{} fact(s): {} expired, {} expiring soon, {} healthy",
            report.total(),
            report.expired.len(),
            report.expiring_soon.len(),
            report.healthy.len()
        )];
        if !report.expired.is_empty() || !report.expiring_soon.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Domain", "Days left", "Claim"]);
            for audited in report.expired.iter().chain(&report.expiring_soon) {
                builder.push_record(audit_row(audited));
            }
            lines.push(self.table(builder));
        }
        lines.push(if report.passed() {
            self.success("Audit passed")
        } else {
            self.error("Audit found expired facts")
        });
        Ok(lines.join("\n"))
    }

    /// Format a prune count.
    pub fn pruned(&self, count: usize) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(&serde_json::json!({ "pruned": count }));
        }
        Ok(if count == 0 {
            self.info("Nothing to prune")
        } else {
            self.success(&format!("Pruned {} expired fact(s)", count))
        })
    }

    /// Format graph statistics.
    pub fn stats(&self, stats: &GraphStats) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(stats);
        }
        let mut builder = Builder::default();
        builder.push_record(["Group", "Name", "Facts"]);
        for (domain, count) in &stats.by_domain {
            builder.push_record(["domain".to_string(), domain.clone(), count.to_string()]);
        }
        for (status, count) in &stats.by_status {
            builder.push_record(["status".to_string(), status.to_string(), count.to_string()]);
        }
        Ok(format!("{} fact(s)\n{}", stats.total, self.table(builder)))
    }

    /// Format a chain result.
    pub fn chain(&self, result: &ChainResult) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(result);
        }
        let headline = format!("{} step(s) → {:.0}%", result.steps, result.final_score);
        Ok(match result.warning {
            Some(warning) => format!("{}\n{}", headline, self.warning(warning.message())),
            None => headline,
        })
    }

    /// Format a trigger scan, with the evidence review if one was made.
    pub fn scan(&self, triggers: &[TriggerMatch], review: Option<&ClaimReview>) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(&serde_json::json!({ "triggers": triggers, "review": review }));
        }
        let mut lines = if triggers.is_empty() {
            vec![self.success("No trigger phrases")]
        } else {
            self.trigger_lines(triggers)
        };
        if let Some(review) = review {
            let verdict = &review.verdict;
            lines.push(match &verdict.reason {
                None => self.success(&format!(
                    "Tier {} accepted in {} (score {}, stored as {})",
                    verdict.tier, review.domain, verdict.score, review.fact_status
                )),
                Some(reason) => self.error(&format!("Blocked: {}", reason)),
            });
        }
        Ok(lines.join("\n"))
    }

    /// Format janitor metrics.
    pub fn sweep(&self, metrics: &JanitorMetrics, dry_run: bool) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(metrics);
        }
        let summary = metrics.summary();
        Ok(if dry_run {
            format!("{}\n{}", self.info("Dry run: nothing was written"), summary)
        } else {
            summary
        })
    }

    fn trigger_lines(&self, triggers: &[TriggerMatch]) -> Vec<String> {
        triggers
            .iter()
            .map(|t| {
                self.warning(&format!(
                    "{} \"{}\" in \"{}\"",
                    t.category, t.matched, t.excerpt
                ))
            })
            .collect()
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn audit_row(audited: &AuditedFact) -> [String; 4] {
    [
        audited.fact.id.to_string(),
        audited.fact.domain.clone(),
        audited
            .status
            .days_remaining
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        audited.fact.claim.clone(),
    ]
}
