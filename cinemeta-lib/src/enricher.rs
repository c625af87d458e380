use std::path::Path;

use cinemeta_core::{CompletionPolicy, Record, RecordSchema};
use cinemeta_scraper::{EnrichmentSource, FetchError};
use cinemeta_store::{RecordStore, StartMode, validate_keys};

use crate::clock::{Clock, SystemClock};
use crate::error::EnrichError;
use crate::options::EnrichOptions;
use crate::progress::{EnrichEvent, EnrichProgress};
use crate::stats::EnrichStats;

/// Drives one source over a record collection.
///
/// A run loads the collection (or the checkpoint when resuming), selects the
/// records the completion policy says are incomplete, fetches them one at a
/// time and saves the whole collection every `save_interval` processed
/// records and once more at the end. Fetch failures leave the record as it
/// was; only load and save errors end the run.
pub struct BatchEnricher<S, R, C = SystemClock> {
    source: S,
    store: R,
    policy: CompletionPolicy,
    schema: RecordSchema,
    options: EnrichOptions,
    clock: C,
}

impl<S, R> BatchEnricher<S, R, SystemClock>
where
    S: EnrichmentSource,
    R: RecordStore,
{
    pub fn new(source: S, store: R, policy: CompletionPolicy, options: EnrichOptions) -> Self {
        Self {
            source,
            store,
            policy,
            schema: RecordSchema::default(),
            options,
            clock: SystemClock,
        }
    }
}

impl<S, R, C> BatchEnricher<S, R, C>
where
    S: EnrichmentSource,
    R: RecordStore,
    C: Clock,
{
    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> BatchEnricher<S, R, C2> {
        BatchEnricher {
            source: self.source,
            store: self.store,
            policy: self.policy,
            schema: self.schema,
            options: self.options,
            clock,
        }
    }

    pub fn options(&self) -> &EnrichOptions {
        &self.options
    }

    /// Indices of records that still need enrichment, in collection order,
    /// truncated to `limit`.
    pub fn select(&self, records: &[Record]) -> Vec<usize> {
        let selected = records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.policy.needs_enrichment(r))
            .map(|(i, _)| i);
        match self.options.limit {
            Some(limit) => selected.take(limit).collect(),
            None => selected.collect(),
        }
    }

    /// Run one pass. `checkpoint` is where every save goes; on a fresh start
    /// the collection comes from `primary`.
    pub fn run(
        &self,
        primary: &Path,
        checkpoint: &Path,
        mode: &StartMode,
        progress: &dyn EnrichProgress,
    ) -> Result<EnrichStats, EnrichError> {
        self.options.validate()?;

        let mut records = self.store.load_or_resume(primary, mode)?;
        validate_keys(&records, &self.schema);

        let selected = self.select(&records);
        let mut stats = EnrichStats {
            total: records.len(),
            selected: selected.len(),
            ..Default::default()
        };
        progress.on_event(&EnrichEvent::Started {
            source: self.source.name().to_string(),
            total: stats.total,
            selected: stats.selected,
            resumed: mode.is_resume(),
        });

        if self.options.dry_run {
            for &index in &selected {
                let record = &records[index];
                progress.on_event(&EnrichEvent::WouldFetch {
                    index,
                    label: record.label(&self.schema),
                    id: record.external_id(&self.schema),
                });
            }
            progress.on_event(&EnrichEvent::Done {
                stats: stats.clone(),
            });
            return Ok(stats);
        }

        let mut fetched_any = false;
        for (position, &index) in selected.iter().enumerate() {
            let label = records[index].label(&self.schema);
            progress.on_event(&EnrichEvent::RecordStarted {
                position: position + 1,
                selected: stats.selected,
                index,
                label: label.clone(),
            });

            let Some(id) = records[index].external_id(&self.schema) else {
                stats.skipped_missing_id += 1;
                progress.on_event(&EnrichEvent::SkippedMissingId { index, label });
                continue;
            };

            if fetched_any && !self.options.request_delay.is_zero() {
                self.clock.sleep(self.options.request_delay);
            }
            fetched_any = true;

            let result =
                self.options
                    .retry
                    .fetch(&self.source, id, &self.clock, |attempt, wait| {
                        progress.on_event(&EnrichEvent::Backoff {
                            index,
                            label: label.clone(),
                            attempt,
                            wait,
                        });
                    });
            stats.processed += 1;

            match result {
                Ok(update) => {
                    let fields_written = records[index].merge(update);
                    stats.enriched += 1;
                    progress.on_event(&EnrichEvent::Enriched {
                        index,
                        label,
                        id,
                        fields_written,
                    });
                }
                Err(FetchError::NotFound) => {
                    stats.not_found += 1;
                    progress.on_event(&EnrichEvent::NotFound { index, label, id });
                }
                Err(error) => {
                    if error == FetchError::RateLimited {
                        stats.rate_limited += 1;
                    } else {
                        stats.failed += 1;
                    }
                    progress.on_event(&EnrichEvent::Failed {
                        index,
                        label,
                        id,
                        error,
                    });
                }
            }

            if self.options.checkpoint_due(stats.processed) {
                self.checkpoint(&records, checkpoint, &mut stats, progress)?;
            }
        }

        self.checkpoint(&records, checkpoint, &mut stats, progress)?;
        progress.on_event(&EnrichEvent::Done {
            stats: stats.clone(),
        });
        Ok(stats)
    }

    fn checkpoint(
        &self,
        records: &[Record],
        path: &Path,
        stats: &mut EnrichStats,
        progress: &dyn EnrichProgress,
    ) -> Result<(), EnrichError> {
        self.store.save(records, path)?;
        stats.checkpoints += 1;
        progress.on_event(&EnrichEvent::Checkpoint {
            path: path.to_path_buf(),
            processed: stats.processed,
            selected: stats.selected,
        });
        Ok(())
    }
}
