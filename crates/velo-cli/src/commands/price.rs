//! Price command implementation.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{Context, SelectionArgs};
use crate::output::{format_money, print_output, print_single};

/// One priced selection.
#[derive(Debug, Serialize, Tabled)]
pub struct PriceRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Option")]
    pub label: String,
    #[tabled(rename = "Base")]
    pub base_price: Decimal,
    #[tabled(rename = "Price")]
    pub price: Decimal,
    #[tabled(rename = "Adjusted")]
    pub adjusted: bool,
}

#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    currency: &'a str,
    lines: &'a [PriceRow],
    total: Decimal,
}

/// Execute the price command.
pub fn execute(ctx: &Context, args: SelectionArgs) -> Result<bool> {
    let state = args.to_state();
    let manager = ctx.manager();

    let rows: Vec<PriceRow> = manager
        .price_lines(&state)
        .into_iter()
        .map(|line| PriceRow {
            adjusted: line.is_modified(),
            category: line.name,
            label: line.label,
            base_price: line.base_price.normalize(),
            price: line.price.normalize(),
        })
        .collect();
    let total = manager.engine().total_price(&state).normalize();

    match ctx.format {
        OutputFormat::Table => {
            print_output(&rows, ctx.format)?;
            println!("Total: {}", format_money(total, ctx.currency()));
        }
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Json => print_single(
            &PriceReport {
                currency: ctx.currency(),
                lines: &rows,
                total,
            },
            ctx.format,
        )?,
        OutputFormat::Minimal => println!("{}", total),
    }
    Ok(true)
}
