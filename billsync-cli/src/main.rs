//! billsync — bill payload reconciliation CLI.
//!
//! # Usage
//!
//! ```text
//! billsync <payload.json>
//! ```
//!
//! The schema contract (`schema.json`) is read from the payload's directory.
//! Configuration comes from the environment: `NOTION_TOKEN`,
//! `NOTION_DB_BILLS`, `NOTION_DB_ITEMS`. Exit code 0 on full success; 1 on
//! any validation failure, remote error or missing configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use billsync_core::{payload, SchemaValidator};
use billsync_pipeline::{pipeline, PipelineError, SyncSummary};
use billsync_store::{HttpRecordClient, StoreConfig};

#[derive(Parser, Debug)]
#[command(
    name = "billsync",
    version,
    about = "Reconcile a billing payload against the remote record store",
    long_about = None,
)]
struct Cli {
    /// Path to the payload document; `schema.json` is expected next to it.
    payload: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(summary) => {
            print_summary(&summary)?;
            Ok(())
        }
        Err(err) => {
            explain_partial_failure(&err);
            Err(err)
        }
    }
}

fn execute(cli: &Cli) -> Result<SyncSummary> {
    // Missing configuration is a hard startup failure, before any file I/O.
    let config = StoreConfig::from_env().context("loading store configuration")?;

    let schema_path = schema_path_for(&cli.payload);
    let validator = SchemaValidator::from_file(&schema_path)
        .with_context(|| format!("loading schema contract at {}", schema_path.display()))?;
    let document = payload::load_value(&cli.payload)
        .with_context(|| format!("loading payload {}", cli.payload.display()))?;

    let client = HttpRecordClient::new(&config);
    let summary = pipeline::run(
        &client,
        &config.bills_collection,
        &config.items_collection,
        &validator,
        &document,
    )?;
    Ok(summary)
}

/// `schema.json`, co-located with the payload document.
fn schema_path_for(payload: &Path) -> PathBuf {
    payload
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join("schema.json")
}

fn print_summary(summary: &SyncSummary) -> Result<()> {
    println!(
        "{} bill '{}' synced — {} item(s), final status {}",
        "✓".green(),
        summary.bill_no,
        summary.items_processed,
        summary.final_status.to_string().bold()
    );
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Re-running after a mid-sequence item failure is not idempotent; tell the
/// operator exactly what already committed.
fn explain_partial_failure(err: &anyhow::Error) {
    if let Some(PipelineError::ItemCreate { index, .. }) = err.downcast_ref::<PipelineError>() {
        eprintln!(
            "{} the bill header and {} item(s) were already committed before the failure; \
             re-running this payload will append duplicate line items",
            "note:".yellow(),
            index - 1
        );
    }
}
