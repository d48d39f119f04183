//! `dexfetch run` – fetch the whole range, checkpointing as it goes.

use anyhow::{Context, Result};
use dexfetch_core::config::FetchConfig;
use dexfetch_core::orchestrator::{Orchestrator, RunEvent, SkipReason};
use std::io::Write;

pub fn run_fetch(cfg: &FetchConfig, quiet: bool) -> Result<()> {
    println!("Fetching {} records from {} ...", cfg.limit, cfg.base_url);
    let orchestrator = Orchestrator::from_config(cfg.clone());

    let summary = orchestrator
        .run(|event| match event {
            RunEvent::Resumed { rows } => {
                println!(
                    "Resuming from previous file: {} ({} rows)",
                    cfg.checkpoint_path.display(),
                    rows
                );
            }
            RunEvent::Fetched { row, limit } => {
                if !quiet {
                    print!("\r  #{:<5} / {:<5} {:<24}", row.id, limit, row.name);
                    let _ = std::io::stdout().flush();
                }
            }
            RunEvent::Degraded { id } => {
                println!("\nFailed species #{}, legendary status recorded as false.", id);
            }
            RunEvent::Skipped { id, reason } => match reason {
                SkipReason::PrimaryUnavailable => println!("\nFailed #{}, skipping.", id),
                SkipReason::IdMismatch { got } => {
                    println!("\nRequested #{} but received #{}, skipping.", id, got)
                }
                SkipReason::InvalidUrl => println!("\nCannot build URL for #{}, skipping.", id),
            },
            RunEvent::Checkpointed { rows, last_id } => {
                let at = last_id.map(|id| format!(" at #{}", id)).unwrap_or_default();
                println!("\nAutosaved progress{} ({} rows)", at, rows);
            }
            RunEvent::Completed { rows, path } => {
                println!("\nSaved full dataset ({} rows) to {}", rows, path.display());
            }
        })
        .with_context(|| {
            format!(
                "fetch aborted; progress kept in {}",
                cfg.checkpoint_path.display()
            )
        })?;

    if !summary.skipped.is_empty() {
        println!(
            "{} identifier(s) skipped; run again to retry them.",
            summary.skipped.len()
        );
    }
    if !summary.degraded.is_empty() {
        println!(
            "{} row(s) without legendary status: {:?}",
            summary.degraded.len(),
            summary.degraded
        );
    }
    Ok(())
}
