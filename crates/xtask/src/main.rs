//! Development tasks for the initiative tracker
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ReadOrder, Simulate};

/// Development tasks for the initiative tracker
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the initiative tracker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read and inspect a stored turn order
    ReadOrder(ReadOrder),

    /// Run a scripted encounter from a roster file
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (RUST_LOG and friends)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ReadOrder(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
