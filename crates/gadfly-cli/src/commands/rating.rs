//! Rating commands: rate, challenge, declare, session, summary, route.

use crate::cli::{DeclareArgs, DomainArg, RateArgs};
use crate::context::Context;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the rate command.
pub fn execute_rate(args: RateArgs, context: &Context, formatter: &Formatter) -> Result<String> {
    let mut coach = context.coach()?;
    let report = coach.record_outcome(&args.domain, args.outcome, args.excerpt.as_deref())?;
    formatter.outcome(&report)
}

/// Execute the challenge command.
pub fn execute_challenge(args: DomainArg, context: &Context, formatter: &Formatter) -> Result<String> {
    let mut coach = context.coach()?;
    let challenge = coach.challenge(&args.domain)?;
    formatter.challenge(&challenge)
}

/// Execute the declare command.
pub fn execute_declare(args: DeclareArgs, context: &Context, formatter: &Formatter) -> Result<String> {
    let mut coach = context.coach()?;
    let profile = coach.declare(&args.domain, args.rating)?;
    formatter.profile(&args.domain, &profile)
}

/// Execute the session command.
pub fn execute_session(context: &Context, formatter: &Formatter) -> Result<String> {
    let bumped = context.coach()?.start_session()?;
    formatter.session(bumped)
}

/// Execute the summary command.
pub fn execute_summary(context: &Context, formatter: &Formatter) -> Result<String> {
    let rows = context.coach()?.summary()?;
    formatter.summary(&rows)
}

/// Execute the route command.
pub fn execute_route(context: &Context, formatter: &Formatter) -> Result<String> {
    let decision = context.coach()?.route()?;
    formatter.route(&decision)
}
