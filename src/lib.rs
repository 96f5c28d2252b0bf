pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod report;
pub mod scanner;
pub mod snapshot;
pub mod store;

pub use cli::{Cli, Command};
pub use config::Config;
pub use diff::{DiffReport, SummaryStats, diff};
pub use error::IntegrityError;
pub use scanner::{ScanOutcome, SkippedFile, collect_files, hash_file, scan};
pub use snapshot::Snapshot;
pub use store::{load, save};
