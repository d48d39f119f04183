//! Progress events and the end-of-run summary.

use crate::normalize::OutputRow;
use std::path::Path;

/// Why an identifier produced no row in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Every attempt at the primary record failed.
    PrimaryUnavailable,
    /// The API answered with a record for a different identifier.
    IdMismatch { got: u32 },
    /// The primary URL could not be built from the configured base.
    InvalidUrl,
}

/// Progress notifications emitted by [`super::Orchestrator::run`].
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// Rows loaded from an existing checkpoint.
    Resumed { rows: usize },
    /// A new row was appended.
    Fetched { row: &'a OutputRow, limit: u32 },
    /// The secondary lookup failed; the row was kept with `is_legendary = false`.
    Degraded { id: u32 },
    /// The identifier was given up for this run.
    Skipped { id: u32, reason: SkipReason },
    /// The checkpoint file was rewritten.
    Checkpointed { rows: usize, last_id: Option<u32> },
    /// The final table was written.
    Completed { rows: usize, path: &'a Path },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows carried over from the checkpoint.
    pub resumed: usize,
    /// Rows fetched in this run.
    pub fetched: usize,
    /// Identifiers skipped in this run, ascending.
    pub skipped: Vec<u32>,
    /// Identifiers whose row was kept without the secondary record.
    pub degraded: Vec<u32>,
    /// Checkpoint writes in this run, including the closing one.
    pub checkpoints: usize,
    /// Rows in the final table.
    pub rows: usize,
}
