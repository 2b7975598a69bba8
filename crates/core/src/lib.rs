mod apply;
mod batch;
mod config;
mod error;
mod exif_reader;
#[cfg(test)]
mod fixtures;
mod lister;
mod naming;
mod timestamp;

pub use apply::{decide_and_apply, ApplyOptions, DestinationLedger, RenameAction, RenameOutcome};
pub use batch::{process_entry, run, BatchOptions, BatchStats, BatchSummary, ScheduleMode};
pub use config::{app_paths, load_config, load_config_from, resolve_base_dir, AppConfig, AppPaths};
pub use error::{EntryError, EntryFailure, FailureKind};
pub use exif_reader::read_capture_timestamp;
pub use lister::{
    list_images, list_images_ignoring, DirectoryEntry, ImageEntries, DEFAULT_IGNORED_NAMES,
};
pub use naming::{duplicate_candidate, target_file_name, target_path, DUPLICATE_MARKER};
pub use timestamp::{
    format_timestamp, FormatError, CANONICAL_TIMESTAMP_FORMAT, EXIF_TIMESTAMP_FORMAT,
};
