// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rudder - hybrid model router for conversational agents.
//!
//! This binary is operator glue around the router library: dry-run routing
//! decisions and configuration checks. The actual wrapping happens inside
//! the host agent.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod check;
mod route;

/// Rudder - hybrid model router for conversational agents.
#[derive(Parser, Debug)]
#[command(name = "rudder", version, about, long_about = None)]
struct Cli {
    /// Path to the host configuration file (defaults to the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Dry-run a prompt through the classifier and decision engine.
    Route {
        /// The user prompt to classify.
        prompt: String,
    },
    /// Load and validate the router configuration.
    Check,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Route { ref prompt } => route::run(cli.config.as_deref(), prompt).await,
        Commands::Check => check::run(cli.config.as_deref()),
    };

    std::process::exit(exit_code);
}

/// Initializes the tracing subscriber; verbosity comes from `RUST_LOG`.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rudder=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
