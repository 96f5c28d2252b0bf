use std::fs;
use std::io;
use std::path::Path;

use indicatif::{HumanBytes, HumanCount};
use log::info;

use crate::error::IntegrityError;
use crate::snapshot::Snapshot;

/// Default baseline file name, relative to the run directory.
pub const DEFAULT_BASELINE_FILE: &str = "baseline.json";

/// Writes a snapshot to `path` as the new baseline.
///
/// The snapshot is serialized as a pretty-printed JSON object keyed by file
/// path, with lowercase hex fingerprint strings as values. Any existing file
/// at `path` is overwritten without warning; there is no versioning and no
/// backup of the prior baseline.
///
/// # Errors
///
/// Returns `IntegrityError::Io` if the file cannot be written.
pub fn save(snapshot: &Snapshot, path: &Path) -> Result<(), IntegrityError> {
    let content = serde_json::to_vec_pretty(snapshot).map_err(|e| IntegrityError::Io {
        path: path.to_path_buf(),
        source: io::Error::other(e),
    })?;
    fs::write(path, content).map_err(|source| IntegrityError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    info!(
        "Saved baseline with {} entries to '{}' ({})",
        HumanCount(snapshot.len() as u64),
        path.display(),
        HumanBytes(size)
    );
    Ok(())
}

/// Reads a previously saved baseline back into a snapshot.
///
/// The file must contain a flat JSON object of string paths to string
/// fingerprints, exactly as written by [`save`]. The format carries no
/// schema version; a file written by an incompatible build is reported as
/// corrupt rather than migrated.
///
/// # Errors
///
/// * `IntegrityError::BaselineNotFound` if no file exists at `path`.
/// * `IntegrityError::CorruptBaseline` if the content is not a valid
///   path-to-fingerprint mapping.
/// * `IntegrityError::Io` for any other read failure.
pub fn load(path: &Path) -> Result<Snapshot, IntegrityError> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(IntegrityError::BaselineNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(IntegrityError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let snapshot: Snapshot =
        serde_json::from_slice(&content).map_err(|source| IntegrityError::CorruptBaseline {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        "Loaded baseline with {} entries from '{}' ({})",
        HumanCount(snapshot.len() as u64),
        path.display(),
        HumanBytes(content.len() as u64)
    );
    Ok(snapshot)
}
