use crate::apply::{
    decide_and_apply, ApplyOptions, DestinationLedger, RenameAction, RenameOutcome,
};
use crate::error::{EntryError, EntryFailure};
use crate::exif_reader::read_capture_timestamp;
use crate::lister::{list_images_ignoring, DirectoryEntry, DEFAULT_IGNORED_NAMES};
use crate::naming::target_path;
use crate::timestamp::format_timestamp;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    #[default]
    Sequential,
    Concurrent,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub directory: PathBuf,
    pub mode: ScheduleMode,
    /// Worker count for [`ScheduleMode::Concurrent`]; `None` lets rayon decide.
    pub jobs: Option<usize>,
    pub apply: ApplyOptions,
    pub ignored_names: Vec<String>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            mode: ScheduleMode::Sequential,
            jobs: None,
            apply: ApplyOptions::default(),
            ignored_names: DEFAULT_IGNORED_NAMES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchStats {
    pub scanned: usize,
    pub renamed: usize,
    pub duplicates_renamed: usize,
    pub skipped_duplicates: usize,
    pub unchanged: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub directory: PathBuf,
    pub mode: ScheduleMode,
    pub applied: bool,
    pub outcomes: Vec<RenameOutcome>,
    pub failures: Vec<EntryFailure>,
    pub stats: BatchStats,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn count(&self) -> usize {
        self.stats.scanned
    }
}

pub fn run(options: &BatchOptions) -> Result<BatchSummary> {
    let started = Instant::now();
    let entries = list_images_ignoring(&options.directory, &options.ignored_names)?;
    run_entries(options, entries, started)
}

/// Reads the whole listing before touching any file, so a listing failure
/// aborts the batch in either mode without leaving half-applied renames.
fn run_entries<I>(options: &BatchOptions, entries: I, started: Instant) -> Result<BatchSummary>
where
    I: Iterator<Item = Result<DirectoryEntry>>,
{
    let entries = entries.collect::<Result<Vec<_>>>()?;
    let ledger = DestinationLedger::new();

    let results = match options.mode {
        ScheduleMode::Sequential => entries
            .iter()
            .map(|entry| process_entry(entry, &options.apply, &ledger))
            .collect::<Vec<_>>(),
        ScheduleMode::Concurrent => {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(jobs) = options.jobs {
                builder = builder.num_threads(jobs);
            }
            let pool = builder
                .build()
                .context("ワーカースレッドプールを作成できませんでした")?;
            debug!("並列実行: {}スレッド", pool.current_num_threads());
            pool.install(|| {
                entries
                    .par_iter()
                    .map(|entry| process_entry(entry, &options.apply, &ledger))
                    .collect::<Vec<_>>()
            })
        }
    };

    let summary = summarize(options, results, started.elapsed());
    info!("合計時間: {:?}", summary.elapsed);
    Ok(summary)
}

/// Metadata -> timestamp -> name -> decision for one entry.
pub fn process_entry(
    entry: &DirectoryEntry,
    apply: &ApplyOptions,
    ledger: &DestinationLedger,
) -> Result<RenameOutcome, EntryError> {
    let raw = read_capture_timestamp(&entry.path)?;
    let canonical = format_timestamp(&raw).map_err(|source| EntryError::Format {
        path: entry.path.clone(),
        source,
    })?;
    let destination = target_path(&entry.path, &canonical);
    decide_and_apply(&entry.path, &destination, apply, ledger)
}

fn summarize(
    options: &BatchOptions,
    results: Vec<Result<RenameOutcome, EntryError>>,
    elapsed: Duration,
) -> BatchSummary {
    let mut stats = BatchStats {
        scanned: results.len(),
        ..BatchStats::default()
    };
    let mut outcomes = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for result in results {
        match result {
            Ok(outcome) => {
                match outcome.action {
                    RenameAction::Rename => stats.renamed += 1,
                    RenameAction::RenameWithSuffix => stats.duplicates_renamed += 1,
                    RenameAction::SkipDuplicate => stats.skipped_duplicates += 1,
                    RenameAction::Unchanged => stats.unchanged += 1,
                }
                outcomes.push(outcome);
            }
            Err(err) => {
                let failure = err.to_failure();
                warn!("処理をスキップしました: {}", failure.message);
                stats.failed += 1;
                failures.push(failure);
            }
        }
    }

    BatchSummary {
        directory: options.directory.clone(),
        mode: options.mode,
        applied: options.apply.apply,
        outcomes,
        failures,
        stats,
        elapsed,
    }
}
