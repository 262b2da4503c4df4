//! `slotwise` CLI — run the scheduling availability engine from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Resolve the visible block set from a JSON scheduling document (stdin → stdout)
//! slotwise blocks < request.json
//!
//! # Resolve from file to file
//! slotwise blocks -i request.json -o blocks.json
//!
//! # Enumerate planned session dates
//! slotwise plan --anchor 2026-01-07 --weekdays Mon,Wed --count 3
//!
//! # Check a credit balance against proposed minutes
//! slotwise credit --balance 120 --proposed 180
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::{self, Read};

use slotwise::credit::{check, CreditBalance};
use slotwise::recurrence::plan;
use slotwise::session::{SchedulingSession, VisibleBlocksRequest};

#[derive(Parser)]
#[command(name = "slotwise", version, about = "Scheduling availability engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the tagged block set for a scheduling document
    Blocks {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Enumerate planned session dates for an anchor and weekday selection
    Plan {
        /// Anchor date (YYYY-MM-DD)
        #[arg(long)]
        anchor: NaiveDate,
        /// Comma-separated weekdays (e.g. "Mon,Wed")
        #[arg(long)]
        weekdays: String,
        /// Number of sessions to plan
        #[arg(long)]
        count: u32,
    },
    /// Check a remaining-minute balance against proposed session minutes
    Credit {
        /// Remaining balance in minutes
        #[arg(long)]
        balance: u32,
        /// Total proposed session minutes
        #[arg(long)]
        proposed: u32,
    },
}

/// A human edit carried alongside the request: the occurrence on `date`
/// was moved/resized to the given minutes.
#[derive(Debug, Deserialize)]
struct EditDocument {
    date: NaiveDate,
    start_minute: u16,
    end_minute: u16,
}

/// The full `blocks` input: session anchor, accumulated edits, and the
/// visible-range request.
#[derive(Debug, Deserialize)]
struct BlocksDocument {
    anchor: NaiveDate,
    #[serde(default)]
    edits: Vec<EditDocument>,
    #[serde(flatten)]
    request: VisibleBlocksRequest,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Blocks { input, output } => {
            let raw = read_input(input.as_deref())?;
            let doc: BlocksDocument =
                serde_json::from_str(&raw).context("Failed to parse scheduling document")?;

            let mut session = SchedulingSession::new(doc.anchor);
            for edit in &doc.edits {
                session
                    .apply_edit(edit.date, edit.date, edit.start_minute, edit.end_minute)
                    .with_context(|| format!("Failed to apply edit on {}", edit.date))?;
            }

            let blocks = session
                .visible_blocks(&doc.request)
                .context("Failed to resolve visible blocks")?;
            let pretty = serde_json::to_string_pretty(&blocks)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Plan {
            anchor,
            weekdays,
            count,
        } => {
            let selected = parse_weekdays(&weekdays)?;
            let planned = plan(anchor, &selected, count).context("Failed to plan sessions")?;
            println!("{}", serde_json::to_string_pretty(&planned)?);
        }
        Commands::Credit { balance, proposed } => {
            let result = check(
                proposed,
                &CreditBalance {
                    total_remaining_minutes: balance,
                },
            );
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

/// Parse a comma-separated weekday list ("Mon,Wed" or "monday,wednesday").
fn parse_weekdays(raw: &str) -> Result<std::collections::HashSet<chrono::Weekday>> {
    let mut selected = std::collections::HashSet::new();
    for part in raw.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let weekday = trimmed
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown weekday: '{}'", trimmed))?;
        selected.insert(weekday);
    }
    Ok(selected)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
