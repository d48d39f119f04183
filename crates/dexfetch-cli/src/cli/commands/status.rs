//! `dexfetch status` – show checkpoint coverage of the identifier range.

use anyhow::Result;
use dexfetch_core::checkpoint::CheckpointStore;
use dexfetch_core::config::FetchConfig;
use dexfetch_core::status::{RangeList, StatusReport};

pub fn run_status(cfg: &FetchConfig) -> Result<()> {
    let store = CheckpointStore::new(&cfg.checkpoint_path, &cfg.final_path);
    let report = StatusReport::collect(&store, cfg.limit)?;

    println!("checkpoint: {}", store.checkpoint_path().display());
    println!("final:      {}", store.final_path().display());
    println!(
        "{} / {} identifiers done ({} rows in checkpoint)",
        report.done(),
        report.limit,
        report.checkpoint_rows
    );
    match report.final_rows {
        Some(n) => println!("final table written ({} rows)", n),
        None => println!("final table not written yet"),
    }
    if !report.is_complete() {
        println!("missing: {}", RangeList(&report.missing_ranges()));
    }
    Ok(())
}
