//! Summary command implementation.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::{Context, SelectionArgs};
use crate::output::print_single;

#[derive(Debug, Serialize)]
struct SummaryReport {
    summary: String,
    total: Decimal,
    currency: String,
    complete: bool,
}

/// Execute the summary command.
pub fn execute(ctx: &Context, args: SelectionArgs) -> Result<bool> {
    let state = args.to_state();
    let manager = ctx.manager();
    let summary = manager.summary(&state);

    match ctx.format {
        OutputFormat::Table | OutputFormat::Minimal => println!("{}", summary),
        OutputFormat::Json | OutputFormat::Csv => print_single(
            &SummaryReport {
                summary,
                total: manager.engine().total_price(&state).normalize(),
                currency: ctx.currency().to_string(),
                complete: manager.is_complete(&state),
            },
            ctx.format,
        )?,
    }
    Ok(true)
}
