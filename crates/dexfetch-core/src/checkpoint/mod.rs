//! Checkpoint store: CSV persistence for partial and final tables.
//!
//! Every write is a full rewrite through a temp file in the destination
//! directory followed by an atomic rename, so a crash mid-write leaves the
//! previous checkpoint intact. The checkpoint and the final table live at
//! distinct paths; only the checkpoint is read back on resume.

mod error;
mod table;

pub use error::StorageError;

use crate::normalize::OutputRow;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Rows loaded from a checkpoint plus the identifiers they cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partial {
    pub rows: Vec<OutputRow>,
    pub completed_ids: BTreeSet<u32>,
}

impl Partial {
    /// Build from rows in file order. Later rows repeating an id are dropped.
    pub fn from_rows(rows: Vec<OutputRow>) -> Self {
        let mut completed_ids = BTreeSet::new();
        let mut kept = Vec::with_capacity(rows.len());
        for row in rows {
            if completed_ids.insert(row.id) {
                kept.push(row);
            } else {
                tracing::warn!(id = row.id, "duplicate row in checkpoint, keeping the first");
            }
        }
        Self {
            rows: kept,
            completed_ids,
        }
    }
}

/// Checkpoint and final table locations.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    checkpoint_path: PathBuf,
    final_path: PathBuf,
}

impl CheckpointStore {
    pub fn new(checkpoint_path: impl Into<PathBuf>, final_path: impl Into<PathBuf>) -> Self {
        Self {
            checkpoint_path: checkpoint_path.into(),
            final_path: final_path.into(),
        }
    }

    pub fn checkpoint_path(&self) -> &Path {
        &self.checkpoint_path
    }

    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Load the checkpoint. A missing file is an empty partial, not an error.
    pub fn load_partial(&self) -> Result<Partial, StorageError> {
        match table::read_rows(&self.checkpoint_path)? {
            Some(rows) => {
                tracing::debug!(
                    path = %self.checkpoint_path.display(),
                    rows = rows.len(),
                    "loaded checkpoint"
                );
                Ok(Partial::from_rows(rows))
            }
            None => Ok(Partial::default()),
        }
    }

    /// Overwrite the checkpoint with all rows accumulated so far.
    pub fn save_partial(&self, rows: &[OutputRow]) -> Result<(), StorageError> {
        table::write_rows_atomic(&self.checkpoint_path, rows)
    }

    /// Write the complete table to the final output path.
    pub fn save_final(&self, rows: &[OutputRow]) -> Result<(), StorageError> {
        table::write_rows_atomic(&self.final_path, rows)
    }

    /// Read the final table back, if one has been written.
    pub fn load_final(&self) -> Result<Option<Vec<OutputRow>>, StorageError> {
        table::read_rows(&self.final_path)
    }
}
