use crate::timestamp::FormatError;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure confined to a single file. The batch logs it and moves on.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("{}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    #[error("画像のメタデータを読めませんでした: {}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },
    #[error("撮影日時 (DateTimeOriginal) がありません: {}", .path.display())]
    MissingField { path: PathBuf },
    #[error("リネームに失敗しました: {} -> {}", .from.display(), .to.display())]
    Filesystem {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Format,
    Metadata,
    MissingField,
    Filesystem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

impl EntryError {
    pub fn kind(&self) -> FailureKind {
        match self {
            EntryError::Format { .. } => FailureKind::Format,
            EntryError::Metadata { .. } => FailureKind::Metadata,
            EntryError::MissingField { .. } => FailureKind::MissingField,
            EntryError::Filesystem { .. } => FailureKind::Filesystem,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            EntryError::Format { path, .. }
            | EntryError::Metadata { path, .. }
            | EntryError::MissingField { path } => path,
            EntryError::Filesystem { from, .. } => from,
        }
    }

    /// Message including the underlying cause, suitable for a single log line.
    pub fn detailed_message(&self) -> String {
        match std::error::Error::source(self) {
            Some(cause) if !matches!(self, EntryError::Format { .. }) => {
                format!("{self}: {cause}")
            }
            _ => self.to_string(),
        }
    }

    pub fn to_failure(&self) -> EntryFailure {
        EntryFailure {
            path: self.path().clone(),
            kind: self.kind(),
            message: self.detailed_message(),
        }
    }
}
