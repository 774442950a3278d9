//! Catalog command implementation.
//!
//! Lists every option with its catalog price, its price given the selection,
//! and whether the selection rules it out.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::commands::{Context, SelectionArgs};
use crate::error::CliError;
use crate::output::print_output;

/// Arguments for the catalog command.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Only show this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Hide disabled options
    #[arg(long)]
    pub available: bool,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// One option row.
#[derive(Debug, Serialize, Tabled)]
pub struct OptionRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Base")]
    pub base_price: Decimal,
    #[tabled(rename = "Price")]
    pub price: Decimal,
    #[tabled(rename = "Selected")]
    pub selected: bool,
    #[tabled(rename = "Disabled")]
    pub disabled: bool,
}

/// Execute the catalog command.
pub fn execute(ctx: &Context, args: CatalogArgs) -> Result<bool> {
    let catalog = &ctx.product.catalog;
    if let Some(category) = &args.category {
        if catalog.category(category).is_none() {
            return Err(CliError::UnknownCategory(category.clone()).into());
        }
    }

    let state = args.selection.to_state();
    let engine = ctx.engine();

    let rows: Vec<OptionRow> = catalog
        .sorted_by_order()
        .into_iter()
        .filter(|c| args.category.as_deref().map_or(true, |id| c.id.as_str() == id))
        .flat_map(|category| {
            let state = &state;
            category.options.iter().map(move |option| {
                let (id, value) = (category.id.as_str(), option.value.as_str());
                OptionRow {
                    category: id.to_string(),
                    value: value.to_string(),
                    label: option.label.clone(),
                    base_price: option.base_price.normalize(),
                    price: engine.dynamic_price(id, value, state).normalize(),
                    selected: state.get(id) == Some(&option.value),
                    disabled: engine.is_option_disabled(id, value, state),
                }
            })
        })
        .filter(|row| !(args.available && row.disabled))
        .collect();

    print_output(&rows, ctx.format)?;
    Ok(true)
}
