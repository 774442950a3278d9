//! Saved configuration commands: save, load, list and delete.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use velo_core::Configuration;

use crate::cli::OutputFormat;
use crate::commands::{Context, IdArgs, SelectionArgs};
use crate::error::CliError;
use crate::output::{format_money, print_header, print_output, print_single, print_success, print_warning};

/// One saved configuration.
#[derive(Debug, Serialize, Tabled)]
pub struct SavedRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Created")]
    pub created_at: String,
    #[tabled(rename = "Selections")]
    pub selections: usize,
    #[tabled(rename = "Total")]
    pub total: Decimal,
}

impl From<&Configuration> for SavedRow {
    fn from(configuration: &Configuration) -> Self {
        Self {
            id: configuration.id.to_string(),
            created_at: configuration.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            selections: configuration.selections.selected_count(),
            total: configuration.total_price.normalize(),
        }
    }
}

#[derive(Debug, Serialize)]
struct LoadReport<'a> {
    configuration: &'a Configuration,
    current_total: Decimal,
    complete: bool,
    summary: String,
}

/// Saves a selection and prints the new id.
pub fn save(ctx: &Context, args: SelectionArgs) -> Result<bool> {
    let mut store = ctx.open_store()?;
    for (category, value) in args.selections {
        store.update_component(category, Some(value.into()));
    }

    if !store.is_complete() {
        let missing: Vec<String> = store
            .missing_categories()
            .into_iter()
            .map(|c| c.to_string())
            .collect();
        print_warning(&format!(
            "Saving an incomplete configuration (missing: {})",
            missing.join(", ")
        ));
    }

    let id = store.save_configuration()?;
    match ctx.format {
        OutputFormat::Table => print_success(&format!(
            "Saved configuration {} ({})",
            id,
            format_money(store.calculate_price(), ctx.currency())
        )),
        OutputFormat::Minimal => println!("{}", id),
        OutputFormat::Json | OutputFormat::Csv => {
            if let Some(configuration) = store.saved_configuration(id.as_str())? {
                print_single(&SavedRow::from(&configuration), ctx.format)?;
            }
        }
    }
    Ok(true)
}

/// Loads a saved configuration and re-evaluates it against the current rules.
pub fn load(ctx: &Context, args: IdArgs) -> Result<bool> {
    let mut store = ctx.open_store()?;
    let configuration = store
        .saved_configuration(&args.id)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;
    store.load_configuration(&args.id)?;

    let current_total = store.calculate_price();
    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("Configuration {}", configuration.id));
            println!(
                "Saved {} at {}",
                format_money(configuration.total_price, ctx.currency()),
                configuration.created_at.format("%Y-%m-%d %H:%M:%S")
            );
            if current_total != configuration.total_price {
                print_warning(&format!(
                    "Prices changed since saving; current total is {}",
                    format_money(current_total, ctx.currency())
                ));
            }
            println!();
            println!("{}", store.summary());
        }
        OutputFormat::Minimal => println!("{}", store.summary()),
        OutputFormat::Json => print_single(
            &LoadReport {
                configuration: &configuration,
                current_total: current_total.normalize(),
                complete: store.is_complete(),
                summary: store.summary(),
            },
            ctx.format,
        )?,
        OutputFormat::Csv => print_single(&SavedRow::from(&configuration), ctx.format)?,
    }
    Ok(true)
}

/// Lists saved configurations in creation order.
pub fn list(ctx: &Context) -> Result<bool> {
    let store = ctx.open_store()?;
    let rows: Vec<SavedRow> = store
        .saved_configurations()?
        .iter()
        .map(SavedRow::from)
        .collect();
    print_output(&rows, ctx.format)?;
    Ok(true)
}

/// Deletes a saved configuration.
pub fn delete(ctx: &Context, args: IdArgs) -> Result<bool> {
    let store = ctx.open_store()?;
    if !store.delete_configuration(&args.id)? {
        return Err(CliError::NotFound(args.id).into());
    }
    if ctx.format == OutputFormat::Table {
        print_success(&format!("Deleted configuration {}", args.id));
    }
    Ok(true)
}
