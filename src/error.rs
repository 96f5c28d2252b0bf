use std::io;
use std::path::PathBuf;

/// Errors surfaced by the integrity core.
///
/// Per-file read failures during a scan are deliberately not represented
/// here: an unreadable file is excluded from the snapshot and recorded on
/// the [`crate::ScanOutcome`] instead of failing the whole scan.
#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    /// The scan target does not exist or is not a directory.
    #[error("Invalid directory: '{0}'")]
    InvalidDirectory(PathBuf),

    /// No baseline snapshot exists at the expected location yet.
    #[error("Baseline file not found: '{0}'. Save a baseline first.")]
    BaselineNotFound(PathBuf),

    /// The baseline file exists but is not a path-to-fingerprint mapping.
    #[error("Baseline file '{path}' is corrupt: {source}")]
    CorruptBaseline {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the baseline file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
