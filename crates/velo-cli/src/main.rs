//! Velo CLI - Command-line interface for the product configurator.
//!
//! # Usage
//!
//! ```bash
//! # Show the catalog with availability for a partial selection
//! velo catalog -s frame-type=diamond
//!
//! # Price a selection
//! velo price -s frame-type=full-suspension -s frame-finish=matte
//!
//! # Check, save and reload
//! velo check -s frame-type=diamond -s wheels=road
//! velo save -s frame-type=diamond -s wheels=road
//! velo load MK03403
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info,velo=debug",
        _ => "debug,velo=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::from_cli(&cli)?;

    // Execute command
    let ok = match cli.command {
        Commands::Catalog(args) => commands::catalog::execute(&ctx, args)?,
        Commands::Price(args) => commands::price::execute(&ctx, args)?,
        Commands::Check(args) => commands::check::execute(&ctx, args)?,
        Commands::Summary(args) => commands::summary::execute(&ctx, args)?,
        Commands::Save(args) => commands::store::save(&ctx, args)?,
        Commands::Load(args) => commands::store::load(&ctx, args)?,
        Commands::List => commands::store::list(&ctx)?,
        Commands::Delete(args) => commands::store::delete(&ctx, args)?,
        Commands::Rules(args) => commands::rules::execute(&ctx, args)?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
