//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{CatalogArgs, IdArgs, RulesArgs, SelectionArgs};

/// Velo - Rules-driven product configurator CLI
#[derive(Parser)]
#[command(name = "velo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Settings file (TOML)
    #[arg(long, global = true, env = "VELO_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Product definition file (JSON); overrides the settings file
    #[arg(long, global = true, env = "VELO_PRODUCT")]
    pub product: Option<PathBuf>,

    /// Saved configuration database; overrides the settings file
    #[arg(long, global = true, env = "VELO_STORE")]
    pub store: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show categories and options with prices and availability
    Catalog(CatalogArgs),

    /// Price a selection line by line
    Price(SelectionArgs),

    /// Check whether a selection can be ordered
    Check(SelectionArgs),

    /// Print a human-readable summary of a selection
    Summary(SelectionArgs),

    /// Save a selection and print its id
    Save(SelectionArgs),

    /// Load a saved configuration and re-evaluate it
    Load(IdArgs),

    /// List saved configurations
    List,

    /// Delete a saved configuration
    Delete(IdArgs),

    /// List business rules and validate the product definition
    Rules(RulesArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
