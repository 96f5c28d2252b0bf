use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::diff::{DiffReport, SummaryStats};

/// Prints the per-path change lines for a check, colored by change class.
pub fn print_check_report(report: &DiffReport, directory: &str) {
    println!("File integrity report for '{}'", directory);
    println!("{}", "-".repeat(60));

    for path in &report.deleted {
        println!("{} {}", "Deleted: ".red(), path);
    }
    for path in &report.modified {
        println!("{} {}", "Modified:".yellow(), path);
    }
    for path in &report.added {
        println!("{} {}", "Added:   ".green(), path);
    }
    if report.is_clean() {
        println!("{}", "No changes since baseline.".green());
    }
}

pub fn print_summary(stats: &SummaryStats) {
    println!();
    println!("Summary:");
    println!("  {} {}", "Modified:".yellow(), stats.modified);
    println!("  {} {}", "Deleted: ".red(), stats.deleted);
    println!("  {} {}", "Added:   ".green(), stats.added);
    println!("  Total scanned: {}", stats.scanned);
}

/// Writes the summary block to a file named from `template`, substituting
/// `{timestamp}` with the local time. Returns the path written.
pub fn export_summary(stats: &SummaryStats, template: &str) -> Result<PathBuf> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let timestamp = now
        .format(format_description!("[year][month][day]-[hour][minute][second]"))
        .context("Failed to format export timestamp")?;
    let date_line = now
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .context("Failed to format report date")?;

    let path = PathBuf::from(expand_template(template, &timestamp));
    let content = format_summary(stats, &date_line);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write summary report: '{}'", path.display()))?;
    Ok(path)
}

fn expand_template(template: &str, timestamp: &str) -> String {
    template.replace("{timestamp}", timestamp)
}

fn format_summary(stats: &SummaryStats, date_line: &str) -> String {
    format!(
        "File Integrity Summary Report\n\
         \n\
         Directory checked: {}\n\
         Date: {}\n\
         Modified files: {}\n\
         Deleted files: {}\n\
         Added files: {}\n\
         Total files scanned: {}\n",
        stats.directory, date_line, stats.modified, stats.deleted, stats.added, stats.scanned
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> SummaryStats {
        SummaryStats {
            directory: "/data".to_string(),
            added: 3,
            deleted: 1,
            modified: 2,
            scanned: 40,
        }
    }

    #[test]
    fn template_substitutes_the_timestamp() {
        assert_eq!(
            expand_template("integrity-summary-{timestamp}.txt", "20260806-120000"),
            "integrity-summary-20260806-120000.txt"
        );
        // A template without the placeholder is used verbatim.
        assert_eq!(expand_template("summary.txt", "20260806-120000"), "summary.txt");
    }

    #[test]
    fn summary_lists_every_count() {
        let content = format_summary(&stats(), "2026-08-06 12:00:00");
        assert!(content.contains("Directory checked: /data"));
        assert!(content.contains("Date: 2026-08-06 12:00:00"));
        assert!(content.contains("Modified files: 2"));
        assert!(content.contains("Deleted files: 1"));
        assert!(content.contains("Added files: 3"));
        assert!(content.contains("Total files scanned: 40"));
    }

    #[test]
    fn export_writes_the_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = format!("{}/summary-{{timestamp}}.txt", dir.path().display());

        let path = export_summary(&stats(), &template).unwrap();
        assert!(path.exists());

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Total files scanned: 40"));
        assert!(!path.file_name().unwrap().to_string_lossy().contains("{timestamp}"));
    }
}
