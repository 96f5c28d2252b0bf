use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{HumanBytes, HumanCount, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::IntegrityError;
use crate::snapshot::Snapshot;

const CHUNK_SIZE: usize = 8192;

/// A file the scanner could not read, left out of the snapshot.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning a directory: the fingerprints that could be computed,
/// plus the files that had to be skipped.
#[derive(Debug)]
pub struct ScanOutcome {
    pub snapshot: Snapshot,
    pub skipped: Vec<SkippedFile>,
}

pub fn hash_file(file_path: &Path) -> std::io::Result<String> {
    let mut file = fs::File::open(file_path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0; CHUNK_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        total_bytes += bytes_read as u64;
    }

    let hash = hasher.finalize().to_hex().to_string();
    debug!("Hashed '{}' ({} bytes)", file_path.display(), total_bytes);

    Ok(hash)
}

fn ensure_directory(path: &Path) -> Result<(), IntegrityError> {
    if !path.is_dir() {
        return Err(IntegrityError::InvalidDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Walks `path` and returns every regular file underneath it.
///
/// Symlinks are not followed: a symlinked directory is not descended into and
/// a symlinked file is not listed. Entries the walker cannot read are skipped.
pub fn collect_files(path: &Path) -> Result<Vec<PathBuf>, IntegrityError> {
    ensure_directory(path)?;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Scanning files and directories...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut file_paths = Vec::new();
    for entry in WalkDir::new(path).into_iter() {
        pb.tick();
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    file_paths.push(entry.path().to_path_buf());
                }
            }
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
            }
        }
    }
    pb.finish_and_clear();

    info!("Found {} files under '{}'", HumanCount(file_paths.len() as u64), path.display());
    Ok(file_paths)
}

/// Scans a directory tree and fingerprints every regular file in it.
///
/// Fails with `InvalidDirectory` before any other I/O if `path` is not an
/// existing directory. Files that cannot be opened or read do not abort the
/// scan; they are excluded from the snapshot and reported on the outcome.
pub fn scan(path: &Path, num_threads: Option<usize>) -> Result<ScanOutcome, IntegrityError> {
    let file_paths = collect_files(path)?;

    let progress_bar = {
        let pb = ProgressBar::new(file_paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg} ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    };

    let bytes_hashed = AtomicU64::new(0);
    let hash_all = || {
        file_paths
            .par_iter()
            .map(|file_path| {
                let result = match hash_file(file_path) {
                    Ok(hash) => {
                        let size = fs::metadata(file_path).map(|m| m.len()).unwrap_or(0);
                        bytes_hashed.fetch_add(size, Ordering::Relaxed);
                        Ok((file_path.to_string_lossy().into_owned(), hash))
                    }
                    Err(e) => {
                        warn!("Skipping '{}': {}", file_path.display(), e);
                        Err(SkippedFile {
                            path: file_path.clone(),
                            reason: e.to_string(),
                        })
                    }
                };
                progress_bar.inc(1);
                result
            })
            .collect::<Vec<Result<(String, String), SkippedFile>>>()
    };

    info!("Hashing files...");
    let results = match num_threads {
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(hash_all),
            Err(e) => {
                warn!("Failed to build thread pool ({}), using default", e);
                hash_all()
            }
        },
        None => hash_all(),
    };
    progress_bar.finish_and_clear();

    let mut snapshot = Snapshot::new();
    let mut skipped = Vec::new();
    for result in results {
        match result {
            Ok((path, hash)) => snapshot.insert(path, hash),
            Err(skip) => skipped.push(skip),
        }
    }

    info!(
        "Hashed {} files ({}), skipped {}",
        HumanCount(snapshot.len() as u64),
        HumanBytes(bytes_hashed.load(Ordering::Relaxed)),
        skipped.len()
    );

    Ok(ScanOutcome { snapshot, skipped })
}
