//! Run a scripted encounter from a roster file
//!
//! Rolls initiative for every sheet in the roster, starts combat and steps
//! through a number of turns, printing each notification as it is published.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::sync::Arc;

use runtime::{
    FileTurnOrderStore, InMemoryTurnOrderStore, Notification, Notifier, RosterOracle, Topic,
    Tracker, TurnOrderStore,
};
use tracker_content::{ConfigLoader, RosterLoader};
use tracker_core::TrackerConfig;

/// Run a scripted encounter from a roster file
#[derive(Parser)]
pub struct Simulate {
    /// Roster of character sheets (RON)
    #[arg(short, long, value_name = "RON")]
    roster: PathBuf,

    /// Tracker config (TOML)
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Number of "next turn" commands to run after combat starts
    #[arg(short, long, default_value_t = 10)]
    turns: usize,

    /// Session seed for initiative and surprise rolls
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Everyone makes a surprise check against this DC
    #[arg(long, value_name = "DC")]
    surprise: Option<i32>,

    /// Keep the order in this file instead of memory
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => TrackerConfig::default(),
        };
        let sheets = RosterLoader::load(&self.roster)?;
        let roster = Arc::new(RosterOracle::new(sheets, self.seed));
        let ids = roster.ids();

        let store: Arc<dyn TurnOrderStore> = match &self.store {
            Some(path) => Arc::new(
                FileTurnOrderStore::new(path, config.clone())
                    .with_context(|| format!("Failed to open store: {}", path.display()))?,
            ),
            None => Arc::new(InMemoryTurnOrderStore::new()),
        };

        let tracker = Tracker::builder()
            .config(config)
            .shared_store(store)
            .roster(roster)
            .notifier(ConsoleNotifier)
            .build()?;

        println!(
            "{} {} participants, seed {}",
            style("Encounter:").bold().cyan(),
            ids.len(),
            self.seed
        );
        println!();

        tracker.start_combat(&ids, self.surprise)?;

        for turn in 1..=self.turns {
            if tracker.order()?.is_empty() {
                tracing::info!("Turn order emptied after {} turns", turn - 1);
                break;
            }
            println!("{}", style(format!("--- next turn ({turn}) ---")).dim());
            tracker.next_turn()?;
        }

        let order = tracker.order()?;
        println!();
        println!("{}", style("Final order:").bold().yellow());
        for entry in order.entries() {
            println!("  {entry}");
        }

        if let Some(path) = &self.store {
            tracing::info!("Final order saved to {}", path.display());
        }

        Ok(())
    }
}

/// Prints notifications to stdout, coloured by topic.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        let line = notification.to_string();
        match notification.topic() {
            Topic::Combat => println!("{}", style(line).green()),
            Topic::Turn => println!("{line}"),
            Topic::Error => println!("{}", style(line).red().bold()),
        }
    }
}
