//! Command-line interface for libranet.
//!
//! Provides a scripted circulation demo, a duration parser check,
//! and a view of the resolved configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::clock::ManualClock;
use crate::config::{load_config, LibraryConfig};
use crate::domain::{parse_duration, ItemSequence, LendingResult};
use crate::library::Catalog;

/// libranet - library circulation with overdue fines
#[derive(Parser, Debug)]
#[command(name = "libranet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the sample borrow/return scenario on simulated time
    Demo {
        /// Days to let pass between borrowing and returning
        #[arg(short, long, default_value = "10")]
        days: i64,

        /// Print the final catalog state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a duration such as "2 weeks" into days
    Parse {
        /// Duration text
        duration: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Demo { days, json } => {
                let resolved = load_config()?;
                run_demo(resolved.library, days, json)
            }
            Commands::Parse { duration } => {
                match parse_duration(&duration) {
                    Ok(days) => println!("{} days", days),
                    Err(e) => println!("{}", e),
                }
                Ok(())
            }
            Commands::Config => show_config(),
        }
    }
}

/// Print the line for a lending outcome, success or not
fn report<T: std::fmt::Display>(result: LendingResult<T>) {
    match result {
        Ok(outcome) => println!("{}", outcome),
        Err(e) => println!("{}", e),
    }
}

fn run_demo(config: LibraryConfig, days: i64, json: bool) -> Result<()> {
    let mut catalog = Catalog::with_config(config, ManualClock::starting_now());
    let mut seq = ItemSequence::new();

    let book = catalog.add_item(seq.book("The Intelligent Investor", "Benjamin Graham", 180));
    let audio = catalog.add_item(seq.audio_book("Momentum Masters", "Mark Minervini"));
    let magazine = catalog.add_item(seq.e_magazine("AI Weekly", "Tech Press"));

    report(catalog.borrow_for(book, "1 week"));
    report(catalog.borrow(book, 3));
    report(catalog.borrow_for(magazine, "someday"));
    report(catalog.play(audio));
    report(catalog.borrow(audio, 3));
    report(catalog.play(audio));
    report(catalog.archive_issue(magazine));

    catalog
        .clock_mut()
        .advance_days(days)
        .with_context(|| format!("Cannot simulate {} days passing", days))?;
    println!("--- {} days later ---", days);

    for line in catalog.list_all_items() {
        println!("{}", line);
    }

    report(catalog.return_item(book));
    report(catalog.return_item(audio));
    report(catalog.return_item(magazine));

    for line in catalog.show_fines() {
        println!("{}", line);
    }

    if json {
        let snapshot = serde_json::to_string_pretty(&catalog.snapshot())
            .context("Failed to serialize catalog")?;
        println!("{}", snapshot);
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let resolved = load_config()?;

    println!("Fine rate per day: Rs.{}", resolved.library.fine_rate_per_day);
    match resolved.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, using defaults)"),
    }

    Ok(())
}
