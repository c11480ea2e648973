//! Command implementations.
//!
//! Each command renders its output as a string; `main` prints it.

pub mod analysis;
pub mod facts;
pub mod maintenance;
pub mod rating;

pub use self::analysis::{execute_chain, execute_scan};
pub use self::facts::{execute_audit, execute_fact, execute_stats};
pub use self::maintenance::{execute_prune, execute_sweep};
pub use self::rating::{
    execute_challenge, execute_declare, execute_rate, execute_route, execute_session,
    execute_summary,
};

use crate::cli::Command;
use crate::context::Context;
use crate::error::Result;
use crate::output::Formatter;

/// Dispatch one parsed command.
pub fn run(command: Command, context: &Context, formatter: &Formatter) -> Result<String> {
    match command {
        Command::Rate(args) => execute_rate(args, context, formatter),
        Command::Challenge(args) => execute_challenge(args, context, formatter),
        Command::Declare(args) => execute_declare(args, context, formatter),
        Command::Session => execute_session(context, formatter),
        Command::Summary => execute_summary(context, formatter),
        Command::Route => execute_route(context, formatter),
        Command::Fact(args) => execute_fact(args, context, formatter),
        Command::Audit(args) => execute_audit(args, context, formatter),
        Command::Prune => execute_prune(context, formatter),
        Command::Stats => execute_stats(context, formatter),
        Command::Chain(args) => execute_chain(args, formatter),
        Command::Scan(args) => execute_scan(args, context, formatter),
        Command::Sweep(args) => execute_sweep(args, context, formatter),
    }
}
