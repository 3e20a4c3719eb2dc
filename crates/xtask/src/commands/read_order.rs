//! Read and inspect a stored turn order
//!
//! Decodes the JSON array the file store writes and displays its contents.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use tracker_content::ConfigLoader;
use tracker_core::{TrackerConfig, TurnEntry, TurnOrder, codec};

/// Read and inspect a stored turn order
#[derive(Parser)]
pub struct ReadOrder {
    /// Turn order file written by the file store
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Tracker config (TOML) the order was written with
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (round, current entry, one line per slot)
    Summary,
    /// Host wire JSON, pretty-printed
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadOrder {
    pub fn execute(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => TrackerConfig::default(),
        };

        if !self.file.exists() {
            anyhow::bail!("Turn order file not found: {}", self.file.display());
        }

        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read turn order file: {}", self.file.display()))?;
        let order = codec::decode(&text, &config)
            .with_context(|| format!("Failed to decode turn order: {}", self.file.display()))?;

        println!("{} {}", style("Order File:").bold().cyan(), self.file.display());
        println!("{} {}", style("File Size:").bold().cyan(), format_bytes(text.len()));
        println!("{} {}", style("Entries:").bold().cyan(), order.len());
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&order),
            OutputFormat::Json => print_json(&order, &config)?,
            OutputFormat::Debug => print_debug(&order),
        }

        Ok(())
    }
}

fn print_summary(order: &TurnOrder) {
    println!("{}", style("=== Turn Order Summary ===").bold().green());
    println!();

    if order.is_empty() {
        println!("  No combat in progress.");
        return;
    }

    println!("{}", style("Round:").bold().yellow());
    match order.round() {
        Some(round) => println!("  {round}"),
        None => println!("  (no round marker)"),
    }
    println!();

    println!("{}", style("Slots:").bold().yellow());
    for (index, entry) in order.entries().iter().enumerate() {
        let line = match entry {
            TurnEntry::Participant { id, priority } => format!("{id} [{priority}]"),
            TurnEntry::RoundMarker { round } => format!("-- start of round {round} --"),
            TurnEntry::TimedEffect {
                description,
                remaining,
            } => format!("{description} ({remaining} rounds left)"),
        };
        if index == 0 {
            println!("  {} {}", style(">").bold().green(), style(line).bold());
        } else {
            println!("    {line}");
        }
    }
    println!();
}

fn print_json(order: &TurnOrder, config: &TrackerConfig) -> Result<()> {
    let wire: Vec<codec::WireEntry> = order
        .entries()
        .iter()
        .map(|entry| codec::to_wire(entry, config))
        .collect();
    let json = serde_json::to_string_pretty(&wire).context("Failed to serialize order to JSON")?;
    println!("{}", json);
    Ok(())
}

fn print_debug(order: &TurnOrder) {
    println!("{:#?}", order);
}

fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;

    if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
