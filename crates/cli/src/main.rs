// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Vesta CLI
//!
//! Operator tooling for PoSt spending templates: build them from the RPC schema,
//! inspect encoded templates, resolve signers and dry-run spends.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vesta_telemetry::LogFormat;

mod commands;
mod util;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "vesta",
    version,
    about = "Build, inspect and check Vesta spending templates.",
    long_about = "Tools for PoSt deferred-installment templates: encode them from JSON requests, decode canonical hex, resolve who may sign at a height and dry-run a spending transaction."
)]
struct Cli {
    /// Engine configuration (TOML). Defaults apply when omitted.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format: json or pretty.
    #[clap(long, global = true, default_value = "json")]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage Ed25519 keys and their destinations.
    Keys(keys::KeysArgs),

    /// Build and inspect templates.
    Template(template::TemplateArgs),

    /// Check spending transactions against a template.
    Spend(spend::SpendArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    vesta_telemetry::init_tracing(cli.log_format)?;

    let config = util::load_config(cli.config.as_deref())?;
    tracing::debug!(target: "cli", ?config, "engine configuration loaded");

    let output = match cli.command {
        Commands::Keys(args) => keys::run(args),
        Commands::Template(args) => template::run(args, &config),
        Commands::Spend(args) => spend::run(args, &config),
    }?;
    println!("{}", output);
    Ok(())
}
