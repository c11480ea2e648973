//! Stateless analysis commands: chain and scan.

use crate::cli::{ChainArgs, ScanArgs};
use crate::context::Context;
use crate::error::Result;
use crate::output::Formatter;
use gadfly_domain::chain;
use gadfly_gatekeeper::TriggerDetector;

/// Execute the chain command.
pub fn execute_chain(args: ChainArgs, formatter: &Formatter) -> Result<String> {
    let result = chain(&args.scores)?;
    formatter.chain(&result)
}

/// Execute the scan command.
pub fn execute_scan(args: ScanArgs, context: &Context, formatter: &Formatter) -> Result<String> {
    match args.tier {
        Some(tier) => {
            let review = context.gatekeeper()?.review(&args.text, tier, &args.domain);
            formatter.scan(&review.triggers, Some(&review))
        }
        None => {
            let triggers = TriggerDetector::new().scan(&args.text);
            formatter.scan(&triggers, None)
        }
    }
}
