//! Resumable bulk-fetch orchestrator.
//!
//! Walks identifiers `1..=limit` in ascending order on the calling thread.
//! Identifiers already present in the checkpoint are skipped without any
//! network call. For the rest: primary fetch, then the secondary lookup it
//! references, then normalize and append. Fetch exhaustion never aborts the
//! run; only storage failures do.

mod events;

pub use events::{RunEvent, RunSummary, SkipReason};

use crate::checkpoint::{CheckpointStore, Partial, StorageError};
use crate::client::{CurlTransport, FetchClient, Fetched, Transport};
use crate::config::{CheckpointCadence, FetchConfig};
use crate::normalize::{normalize, OutputRow};
use crate::record::{self, PrimaryRecord, SecondaryRecord};

/// Result of processing one pending identifier.
enum Processed {
    Row { row: OutputRow, degraded: bool },
    Skipped(SkipReason),
}

pub struct Orchestrator<T> {
    config: FetchConfig,
    client: FetchClient<T>,
    store: CheckpointStore,
}

impl Orchestrator<CurlTransport> {
    /// Orchestrator with the libcurl transport and paths/policy from `config`.
    pub fn from_config(config: FetchConfig) -> Self {
        let client = FetchClient::new(
            CurlTransport::new(),
            config.retry_policy(),
            config.per_attempt_timeout(),
        );
        let store = CheckpointStore::new(&config.checkpoint_path, &config.final_path);
        Self::new(config, client, store)
    }
}

impl<T: Transport> Orchestrator<T> {
    pub fn new(config: FetchConfig, client: FetchClient<T>, store: CheckpointStore) -> Self {
        Self {
            config,
            client,
            store,
        }
    }

    pub fn client(&self) -> &FetchClient<T> {
        &self.client
    }

    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    /// Run over the whole identifier range, reporting progress through `on_event`.
    ///
    /// Returns after the final table is written. A `StorageError` from any
    /// checkpoint or final write ends the run immediately; rows from the last
    /// successful checkpoint remain on disk.
    pub fn run<F>(&self, mut on_event: F) -> Result<RunSummary, StorageError>
    where
        F: FnMut(RunEvent<'_>),
    {
        let Partial {
            mut rows,
            completed_ids,
        } = self.store.load_partial()?;

        let mut summary = RunSummary {
            resumed: rows.len(),
            ..RunSummary::default()
        };
        if !rows.is_empty() {
            tracing::info!(
                rows = rows.len(),
                path = %self.store.checkpoint_path().display(),
                "resuming from checkpoint"
            );
            on_event(RunEvent::Resumed { rows: rows.len() });
        }

        let limit = self.config.limit;
        let delay = self.config.inter_request_delay();
        let mut appended: u32 = 0;
        let mut dirty = false;

        for id in 1..=limit {
            if completed_ids.contains(&id) {
                continue;
            }

            match self.process(id) {
                Processed::Row { row, degraded } => {
                    if degraded {
                        tracing::warn!(
                            id,
                            "secondary record unavailable, is_legendary defaults to false"
                        );
                        summary.degraded.push(id);
                        on_event(RunEvent::Degraded { id });
                    }
                    rows.push(row);
                    appended += 1;
                    summary.fetched += 1;
                    dirty = true;
                    if let Some(row) = rows.last() {
                        tracing::debug!(id, name = %row.name, "row appended");
                        on_event(RunEvent::Fetched { row, limit });
                    }

                    if self.checkpoint_due(id, appended) {
                        self.checkpoint(&rows, &mut summary, &mut on_event)?;
                        dirty = false;
                    }
                }
                Processed::Skipped(reason) => {
                    tracing::warn!(id, ?reason, "skipping identifier for this run");
                    summary.skipped.push(id);
                    on_event(RunEvent::Skipped { id, reason });
                }
            }

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }

        // Closing checkpoint so a rerun finds every row and fetches nothing.
        if dirty {
            self.checkpoint(&rows, &mut summary, &mut on_event)?;
        }

        self.store.save_final(&rows)?;
        summary.rows = rows.len();
        tracing::info!(
            rows = rows.len(),
            fetched = summary.fetched,
            skipped = summary.skipped.len(),
            degraded = summary.degraded.len(),
            path = %self.store.final_path().display(),
            "final table written"
        );
        on_event(RunEvent::Completed {
            rows: rows.len(),
            path: self.store.final_path(),
        });
        Ok(summary)
    }

    fn checkpoint<F>(
        &self,
        rows: &[OutputRow],
        summary: &mut RunSummary,
        on_event: &mut F,
    ) -> Result<(), StorageError>
    where
        F: FnMut(RunEvent<'_>),
    {
        self.store.save_partial(rows)?;
        summary.checkpoints += 1;
        tracing::info!(
            rows = rows.len(),
            path = %self.store.checkpoint_path().display(),
            "checkpoint saved"
        );
        on_event(RunEvent::Checkpointed {
            rows: rows.len(),
            last_id: rows.last().map(|r| r.id),
        });
        Ok(())
    }

    fn checkpoint_due(&self, id: u32, appended: u32) -> bool {
        let n = self.config.checkpoint_every_n.max(1);
        match self.config.checkpoint_cadence {
            CheckpointCadence::NewItems => appended % n == 0,
            CheckpointCadence::AbsoluteId => id % n == 0,
        }
    }

    fn process(&self, id: u32) -> Processed {
        let url = match record::primary_url(&self.config.base_url, id) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(id, "cannot build primary URL: {}", e);
                return Processed::Skipped(SkipReason::InvalidUrl);
            }
        };

        let primary: PrimaryRecord = match self.client.fetch(&url) {
            Fetched::Record(p) => p,
            Fetched::Unavailable => return Processed::Skipped(SkipReason::PrimaryUnavailable),
        };
        if primary.id != id {
            return Processed::Skipped(SkipReason::IdMismatch { got: primary.id });
        }

        let secondary: Fetched<SecondaryRecord> = self.client.fetch(&primary.species.url);
        let row = normalize(&primary, secondary.as_ref());
        Processed::Row {
            row,
            degraded: secondary.is_unavailable(),
        }
    }
}
