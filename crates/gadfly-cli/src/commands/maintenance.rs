//! Maintenance commands: prune and sweep.

use crate::cli::SweepArgs;
use crate::context::Context;
use crate::error::Result;
use crate::output::Formatter;
use gadfly_domain::traits::FactStore;

/// Execute the prune command.
pub fn execute_prune(context: &Context, formatter: &Formatter) -> Result<String> {
    let pruned = context.graph()?.prune(&context.expiration())?;
    formatter.pruned(pruned)
}

/// Execute the sweep command.
pub fn execute_sweep(args: SweepArgs, context: &Context, formatter: &Formatter) -> Result<String> {
    let mut janitor = context.janitor(args.dry_run);
    let mut graph = context.graph()?;
    let mut ratings = context.ratings()?;
    let metrics = janitor.sweep(&mut graph, &mut ratings)?;
    formatter.sweep(&metrics, janitor.config().dry_run)
}
