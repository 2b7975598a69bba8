use crate::error::EntryError;
use crate::naming::duplicate_candidate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct ApplyOptions {
    /// Perform renames. When false every decision is only logged.
    pub apply: bool,
    pub skip_duplicates: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenameAction {
    Rename,
    RenameWithSuffix,
    SkipDuplicate,
    Unchanged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Where the file ends up (or would end up in dry-run).
    pub final_path: PathBuf,
    pub action: RenameAction,
    pub applied: bool,
}

/// Paths claimed and vacated during one batch.
///
/// The check, the reservation and the rename for a destination all happen
/// under the lock, so concurrent tasks never claim the same name. A source
/// that the batch moves away (or would move in dry-run) counts as free, so a
/// dry-run decides exactly as an applied run does.
#[derive(Debug, Default)]
pub struct DestinationLedger {
    state: Mutex<LedgerState>,
}

#[derive(Debug, Default)]
struct LedgerState {
    reserved: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl DestinationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerState {
    fn is_taken(&self, candidate: &Path, source: &Path) -> bool {
        if self.reserved.contains(candidate) {
            return true;
        }
        if candidate == source || self.vacated.contains(candidate) {
            return false;
        }
        // symlink_metadata so a dangling link still counts as occupied
        fs::symlink_metadata(candidate).is_ok()
    }

    fn claim(&mut self, source: &Path, target: &Path) {
        self.reserved.insert(target.to_path_buf());
        if source != target {
            self.vacated.insert(source.to_path_buf());
        }
    }

    fn resolve_duplicate(&self, destination: &Path, source: &Path) -> PathBuf {
        let mut n = 1usize;
        loop {
            let candidate = duplicate_candidate(destination, n);
            if candidate == source || !self.is_taken(&candidate, source) {
                return candidate;
            }
            n += 1;
        }
    }
}

pub fn decide_and_apply(
    source: &Path,
    destination: &Path,
    options: &ApplyOptions,
    ledger: &DestinationLedger,
) -> Result<RenameOutcome, EntryError> {
    let mut state = ledger.lock();

    if destination == source {
        state.claim(source, destination);
        info!("変更なし: {}", source.display());
        return Ok(outcome(
            source,
            destination,
            source,
            RenameAction::Unchanged,
            false,
        ));
    }

    if !state.is_taken(destination, source) {
        if options.apply {
            rename(source, destination)?;
            info!("{} --> {}", source.display(), destination.display());
        } else {
            info!("[dry-run] {} --> {}", source.display(), destination.display());
        }
        state.claim(source, destination);
        return Ok(outcome(
            source,
            destination,
            destination,
            RenameAction::Rename,
            options.apply,
        ));
    }

    if options.skip_duplicates {
        info!(
            "スキップ(重複): {} **** {}",
            source.display(),
            destination.display()
        );
        return Ok(outcome(
            source,
            destination,
            source,
            RenameAction::SkipDuplicate,
            false,
        ));
    }

    let alternate = state.resolve_duplicate(destination, source);
    if alternate == source {
        state.claim(source, &alternate);
        info!("変更なし(重複名): {}", source.display());
        return Ok(outcome(
            source,
            destination,
            source,
            RenameAction::Unchanged,
            false,
        ));
    }

    let prefix = if options.apply { "" } else { "[dry-run] " };
    if options.apply {
        rename(source, &alternate)?;
    }
    state.claim(source, &alternate);
    info!(
        "{}重複のため別名: {} **** {} -> {}",
        prefix,
        source.display(),
        destination.display(),
        alternate.display()
    );
    Ok(outcome(
        source,
        destination,
        &alternate,
        RenameAction::RenameWithSuffix,
        options.apply,
    ))
}

fn rename(from: &Path, to: &Path) -> Result<(), EntryError> {
    fs::rename(from, to).map_err(|source| EntryError::Filesystem {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

fn outcome(
    source: &Path,
    destination: &Path,
    final_path: &Path,
    action: RenameAction,
    applied: bool,
) -> RenameOutcome {
    RenameOutcome {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        final_path: final_path.to_path_buf(),
        action,
        applied,
    }
}
