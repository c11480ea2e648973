//! Knowledge graph commands: fact add/query, audit, stats.

use crate::cli::{AuditArgs, FactAction, FactArgs};
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use gadfly_domain::traits::FactStore;
use gadfly_domain::FactQuery;
use tracing::{info, warn};

/// Execute a fact subcommand.
pub fn execute_fact(args: FactArgs, context: &Context, formatter: &Formatter) -> Result<String> {
    match args.action {
        FactAction::Add {
            claim,
            domain,
            tier,
            status,
            confidence,
            source,
            proof,
            session,
        } => {
            let review = context.gatekeeper()?.review(&claim, tier, &domain);
            if !review.verdict.is_accepted() {
                warn!(domain = %review.domain, tier = tier.value(), "Evidence blocked");
            }

            let mut draft = review.to_draft();
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(confidence) = confidence {
                draft.confidence = confidence;
            }
            draft.source = source;
            draft.proof = proof;
            draft.session_id = session;

            let fact = context.graph()?.add(draft)?;
            formatter.fact_added(&review, &fact)
        }
        FactAction::Query {
            domain,
            status,
            session,
            expired,
        } => {
            let query = FactQuery {
                domain,
                status,
                session_id: session,
                expired_only: expired,
            };
            let facts = context.graph()?.query(&query)?;
            formatter.facts(&facts)
        }
    }
}

/// Execute the audit command.
///
/// With `--fail-on-expired`, expired facts turn into [`CliError::AuditFailed`]
/// carrying the rendered report.
pub fn execute_audit(args: AuditArgs, context: &Context, formatter: &Formatter) -> Result<String> {
    let report = context.graph()?.audit(&context.expiration())?;
    info!(
        total = report.total(),
        expired = report.expired.len(),
        expiring_soon = report.expiring_soon.len(),
        "Audit complete"
    );

    let rendered = formatter.audit(&report)?;
    if args.fail_on_expired && !report.passed() {
        return Err(CliError::AuditFailed {
            expired: report.expired.len(),
            report: rendered,
        });
    }
    Ok(rendered)
}

/// Execute the stats command.
pub fn execute_stats(context: &Context, formatter: &Formatter) -> Result<String> {
    let stats = context.graph()?.stats()?;
    formatter.stats(&stats)
}
