//! Read-only progress report over the checkpoint and final table.

use crate::checkpoint::{CheckpointStore, StorageError};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

/// Snapshot of how far the fetch over `1..=limit` has progressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub limit: u32,
    /// Rows in the checkpoint (may include ids beyond `limit`).
    pub checkpoint_rows: usize,
    /// Rows in the final table, if one was written.
    pub final_rows: Option<usize>,
    /// Identifiers in range with no row yet.
    pub missing: Vec<u32>,
}

impl StatusReport {
    pub fn collect(store: &CheckpointStore, limit: u32) -> Result<Self, StorageError> {
        let partial = store.load_partial()?;
        let final_rows = store.load_final()?.map(|rows| rows.len());
        Ok(Self::from_parts(limit, partial.rows.len(), &partial.completed_ids, final_rows))
    }

    fn from_parts(
        limit: u32,
        checkpoint_rows: usize,
        completed: &BTreeSet<u32>,
        final_rows: Option<usize>,
    ) -> Self {
        let missing = (1..=limit).filter(|id| !completed.contains(id)).collect();
        Self {
            limit,
            checkpoint_rows,
            final_rows,
            missing,
        }
    }

    pub fn done(&self) -> usize {
        self.limit as usize - self.missing.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Missing identifiers folded into contiguous ranges.
    pub fn missing_ranges(&self) -> Vec<RangeInclusive<u32>> {
        let mut ranges: Vec<RangeInclusive<u32>> = Vec::new();
        for &id in &self.missing {
            match ranges.last_mut() {
                Some(r) if *r.end() + 1 == id => *r = *r.start()..=id,
                _ => ranges.push(id..=id),
            }
        }
        ranges
    }
}

/// Formats ranges as `1-3, 7, 9-10`.
pub struct RangeList<'a>(pub &'a [RangeInclusive<u32>]);

impl fmt::Display for RangeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if r.start() == r.end() {
                write!(f, "{}", r.start())?;
            } else {
                write!(f, "{}-{}", r.start(), r.end())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(limit: u32, done: &[u32]) -> StatusReport {
        let completed: BTreeSet<u32> = done.iter().copied().collect();
        StatusReport::from_parts(limit, done.len(), &completed, None)
    }

    #[test]
    fn missing_ids_and_ranges() {
        let r = report(10, &[4, 5, 6, 8]);
        assert_eq!(r.missing, vec![1, 2, 3, 7, 9, 10]);
        assert_eq!(r.done(), 4);
        assert!(!r.is_complete());
        assert_eq!(r.missing_ranges(), vec![1..=3, 7..=7, 9..=10]);
        assert_eq!(RangeList(&r.missing_ranges()).to_string(), "1-3, 7, 9-10");
    }

    #[test]
    fn ids_beyond_limit_do_not_count() {
        let r = report(3, &[1, 2, 3, 40]);
        assert!(r.is_complete());
        assert_eq!(r.done(), 3);
        assert_eq!(r.checkpoint_rows, 4);
    }

    #[test]
    fn collect_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("p.csv"), dir.path().join("f.csv"));
        let r = StatusReport::collect(&store, 3).unwrap();
        assert_eq!(r.missing, vec![1, 2, 3]);
        assert_eq!(r.final_rows, None);
        assert!(RangeList(&[]).to_string().is_empty());
    }
}
