//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use gadfly_domain::{EvidenceTier, FactStatus, Outcome};
use std::path::PathBuf;

/// Gadfly - challenge claims, rate competence, keep facts honest.
#[derive(Debug, Parser)]
#[command(name = "gadfly")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GADFLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record the outcome of a challenged claim
    Rate(RateArgs),

    /// Show how the next claim in a domain will be challenged
    Challenge(DomainArg),

    /// Declare your own rating for a domain
    Declare(DeclareArgs),

    /// Start a new session for every active domain
    Session,

    /// List domains, most recently active first
    Summary,

    /// Recommend a model tier for the current profiles
    Route,

    /// Add or list facts in the knowledge graph
    Fact(FactArgs),

    /// Check every fact against its domain half-life
    Audit(AuditArgs),

    /// Remove expired facts
    Prune,

    /// Count facts by domain and status
    Stats,

    /// Combine step confidences of a reasoning chain
    Chain(ChainArgs),

    /// Look for unverified-claim phrases in text
    Scan(ScanArgs),

    /// Prune expired facts and decay idle profiles
    Sweep(SweepArgs),
}

/// A single domain argument.
#[derive(Debug, Parser)]
pub struct DomainArg {
    /// Topic domain (e.g. security, algorithms)
    pub domain: String,
}

/// Arguments for the rate command.
#[derive(Debug, Parser)]
pub struct RateArgs {
    /// Topic domain
    pub domain: String,

    /// Outcome: validated, partial, blocked, or the score 1, 0.5, 0
    #[arg(value_parser = parse_outcome)]
    pub outcome: Outcome,

    /// Short excerpt of the claim, kept in history
    #[arg(short, long)]
    pub excerpt: Option<String>,
}

/// Arguments for the declare command.
#[derive(Debug, Parser)]
pub struct DeclareArgs {
    /// Topic domain
    pub domain: String,

    /// Self-declared rating (0-1000)
    pub rating: f64,
}

/// Arguments for fact management.
#[derive(Debug, Parser)]
pub struct FactArgs {
    #[command(subcommand)]
    pub action: FactAction,
}

/// Fact actions.
#[derive(Debug, Subcommand)]
pub enum FactAction {
    /// Review a claim's evidence and store it
    Add {
        /// Claim text
        claim: String,
        /// Topic domain
        #[arg(short, long)]
        domain: String,
        /// Evidence tier, 1 (peer-reviewed) to 5 (no source)
        #[arg(short, long, default_value = "5")]
        tier: EvidenceTier,
        /// Store with this status instead of the reviewed one
        #[arg(long)]
        status: Option<FactStatus>,
        /// Store with this confidence (0-100) instead of the tier score
        #[arg(long)]
        confidence: Option<f64>,
        /// Source reference
        #[arg(long)]
        source: Option<String>,
        /// Proof reference
        #[arg(long)]
        proof: Option<String>,
        /// Session that produced the claim
        #[arg(long)]
        session: Option<String>,
    },

    /// List facts
    Query {
        /// Filter by domain
        #[arg(short, long)]
        domain: Option<String>,
        /// Filter by status
        #[arg(short, long)]
        status: Option<FactStatus>,
        /// Filter by session
        #[arg(long)]
        session: Option<String>,
        /// Only facts past their expiry
        #[arg(long)]
        expired: bool,
    },
}

/// Arguments for the audit command.
#[derive(Debug, Parser)]
pub struct AuditArgs {
    /// Exit with status 2 when any fact has expired
    #[arg(long)]
    pub fail_on_expired: bool,
}

/// Arguments for the chain command.
#[derive(Debug, Parser)]
pub struct ChainArgs {
    /// Step confidences (0-100), in order
    #[arg(required = true, allow_negative_numbers = true)]
    pub scores: Vec<f64>,
}

/// Arguments for the scan command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Text to scan
    pub text: String,

    /// Also judge the claim's evidence at this tier
    #[arg(short, long)]
    pub tier: Option<EvidenceTier>,

    /// Domain for the evidence verdict
    #[arg(short, long, default_value = "general")]
    pub domain: String,
}

/// Arguments for the sweep command.
#[derive(Debug, Parser)]
pub struct SweepArgs {
    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Parse an outcome from its name or its score.
fn parse_outcome(value: &str) -> Result<Outcome, String> {
    if let Ok(outcome) = value.parse::<Outcome>() {
        return Ok(outcome);
    }
    let score: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not an outcome or a score", value))?;
    Outcome::from_score(score).map_err(|e| e.to_string())
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_is_not_a_command() {
        assert!(Cli::try_parse_from(["gadfly", "--help"]).is_err());
        assert!(Cli::try_parse_from(["gadfly"]).is_err());
    }

    #[test]
    fn test_rate_command() {
        let cli = Cli::parse_from(["gadfly", "rate", "security", "validated", "-e", "CSP"]);
        match cli.command {
            Command::Rate(args) => {
                assert_eq!(args.domain, "security");
                assert_eq!(args.outcome, Outcome::Validated);
                assert_eq!(args.excerpt.as_deref(), Some("CSP"));
            }
            _ => panic!("Expected Rate command"),
        }
    }

    #[test]
    fn test_outcome_accepts_scores() {
        assert_eq!(parse_outcome("0.5").unwrap(), Outcome::Partial);
        assert_eq!(parse_outcome("0").unwrap(), Outcome::Blocked);
        assert!(parse_outcome("0.7").is_err());
        assert!(parse_outcome("maybe").is_err());
    }

    #[test]
    fn test_fact_add_defaults_to_weakest_tier() {
        let cli = Cli::parse_from(["gadfly", "fact", "add", "Rust has no GC", "-d", "languages"]);
        match cli.command {
            Command::Fact(FactArgs {
                action: FactAction::Add { tier, status, .. },
            }) => {
                assert_eq!(tier, EvidenceTier::WEAKEST);
                assert!(status.is_none());
            }
            _ => panic!("Expected fact add"),
        }
    }

    #[test]
    fn test_invalid_tier_rejected() {
        assert!(Cli::try_parse_from(["gadfly", "fact", "add", "x", "-d", "y", "-t", "6"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["gadfly", "audit", "--fail-on-expired", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Command::Audit(AuditArgs { fail_on_expired: true })));
    }

    #[test]
    fn test_chain_takes_many_scores() {
        let cli = Cli::parse_from(["gadfly", "chain", "80", "80", "80"]);
        match cli.command {
            Command::Chain(args) => assert_eq!(args.scores, vec![80.0, 80.0, 80.0]),
            _ => panic!("Expected Chain command"),
        }
    }
}
