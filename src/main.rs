use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::HumanCount;
use log::{debug, info, warn};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use check_file_integrity::cli::{Cli, Command};
use check_file_integrity::config::Config;
use check_file_integrity::diff::{SummaryStats, diff};
use check_file_integrity::error::IntegrityError;
use check_file_integrity::scanner::{ScanOutcome, collect_files, scan};
use check_file_integrity::{report, store};

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    info!("Starting check-file-integrity v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_or_default(Path::new("."))?;
    let baseline_path = cli.baseline.clone().unwrap_or_else(|| config.baseline_path());
    let threads = cli.threads.or(config.threads);
    debug!("Baseline: '{}', threads: {:?}", baseline_path.display(), threads);

    match &cli.command {
        Command::Save { path } => cmd_save(path, &baseline_path, threads)?,
        Command::Check { path } => {
            let stats = run_check(path, &baseline_path, threads)?;
            report::print_summary(&stats);
        }
        Command::List { path } => cmd_list(path)?,
        Command::Export { path, output } => {
            let stats = run_check(path, &baseline_path, threads)?;
            report::print_summary(&stats);
            let template = output.as_deref().unwrap_or_else(|| config.export_template());
            let written = report::export_summary(&stats, template)?;
            println!("\nSummary written to '{}'", written.display());
        }
    }

    info!("Completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let mut builder = ConfigBuilder::new();
    let _ = builder.set_time_offset_to_local();
    TermLogger::init(level, builder.build(), TerminalMode::Mixed, ColorChoice::Auto)
        .context("Failed to initialize logger")
}

/// Validates the target up front, then canonicalizes it so snapshot keys and
/// report lines use absolute paths.
fn resolve_directory(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(IntegrityError::InvalidDirectory(path.to_path_buf()).into());
    }
    path.canonicalize()
        .with_context(|| format!("Failed to resolve path: '{}'", path.display()))
}

fn warn_skipped(outcome: &ScanOutcome) {
    if outcome.skipped.is_empty() {
        return;
    }
    warn!("{} files could not be read and were skipped:", outcome.skipped.len());
    for skip in &outcome.skipped {
        warn!("  '{}': {}", skip.path.display(), skip.reason);
    }
}

fn cmd_save(path: &Path, baseline_path: &Path, threads: Option<usize>) -> Result<()> {
    let directory = resolve_directory(path)?;
    let outcome = scan(&directory, threads)?;
    warn_skipped(&outcome);

    store::save(&outcome.snapshot, baseline_path)?;
    println!("Baseline saved for '{}'", directory.display());
    println!(
        "Total files recorded: {}",
        HumanCount(outcome.snapshot.len() as u64)
    );
    Ok(())
}

fn run_check(path: &Path, baseline_path: &Path, threads: Option<usize>) -> Result<SummaryStats> {
    let directory = resolve_directory(path)?;
    let baseline = store::load(baseline_path)?;
    let outcome = scan(&directory, threads)?;
    warn_skipped(&outcome);

    let directory = directory.to_string_lossy();
    let diff_report = diff(&baseline, &outcome.snapshot);
    report::print_check_report(&diff_report, &directory);
    Ok(diff_report.summary(&directory))
}

fn cmd_list(path: &Path) -> Result<()> {
    let directory = resolve_directory(path)?;
    let files = collect_files(&directory)?;

    println!("Scanning all files in '{}'", directory.display());
    println!("{}", "-".repeat(60));
    for file in &files {
        println!("{}", file.display());
    }
    println!();
    println!("Total files found: {}", HumanCount(files.len() as u64));
    Ok(())
}
