use crate::snapshot::Snapshot;

/// Classification of every path across two snapshots.
///
/// The three change lists plus the unchanged count partition the union of
/// both snapshots' key sets: every path lands in exactly one class. Lists are
/// in path order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub added: Vec<String>,
    pub deleted: Vec<String>,
    pub modified: Vec<String>,
    /// Paths present in both snapshots with equal fingerprints.
    pub unchanged: usize,
    /// Number of files in the current scan.
    pub scanned: usize,
}

/// Counts shown to the user after an integrity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStats {
    pub directory: String,
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub scanned: usize,
}

/// Compares a baseline snapshot against a fresh scan.
///
/// One pass over each key set; pure function, cannot fail.
pub fn diff(baseline: &Snapshot, current: &Snapshot) -> DiffReport {
    let mut report = DiffReport {
        scanned: current.len(),
        ..DiffReport::default()
    };

    for (path, fingerprint) in baseline.iter() {
        match current.get(path) {
            None => report.deleted.push(path.to_string()),
            Some(f) if f != fingerprint => report.modified.push(path.to_string()),
            Some(_) => report.unchanged += 1,
        }
    }
    for path in current.paths() {
        if !baseline.contains(path) {
            report.added.push(path.to_string());
        }
    }

    report
}

impl DiffReport {
    /// True when the tree matches the baseline exactly.
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    pub fn summary(&self, directory: &str) -> SummaryStats {
        SummaryStats {
            directory: directory.to_string(),
            added: self.added.len(),
            deleted: self.deleted.len(),
            modified: self.modified.len(),
            scanned: self.scanned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, &str)]) -> Snapshot {
        entries
            .iter()
            .map(|(p, h)| (p.to_string(), h.to_string()))
            .collect()
    }

    #[test]
    fn identical_snapshots_are_clean() {
        let a = snapshot(&[("/d/a", "h1"), ("/d/b", "h2")]);
        let report = diff(&a, &a);

        assert!(report.is_clean());
        assert_eq!(report.unchanged, 2);
        assert_eq!(report.scanned, 2);
    }

    #[test]
    fn deleted_and_added_paths_are_classified() {
        let baseline = snapshot(&[("/d/a", "h1"), ("/d/b", "h2")]);
        let current = snapshot(&[("/d/a", "h1"), ("/d/c", "h3")]);

        let report = diff(&baseline, &current);
        assert_eq!(report.deleted, vec!["/d/b"]);
        assert_eq!(report.added, vec!["/d/c"]);
        assert!(report.modified.is_empty());
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.scanned, 2);
    }

    #[test]
    fn changed_fingerprint_is_modified() {
        let baseline = snapshot(&[("/d/a", "h1")]);
        let current = snapshot(&[("/d/a", "h1-changed")]);

        let report = diff(&baseline, &current);
        assert_eq!(report.modified, vec!["/d/a"]);
        assert!(report.added.is_empty());
        assert!(report.deleted.is_empty());
        assert_eq!(report.unchanged, 0);
    }

    #[test]
    fn empty_baseline_reports_everything_added() {
        let baseline = Snapshot::new();
        let current = snapshot(&[("/d/a", "h1"), ("/d/b", "h2")]);

        let report = diff(&baseline, &current);
        assert_eq!(report.added, vec!["/d/a", "/d/b"]);
        assert!(report.deleted.is_empty());
        assert!(report.modified.is_empty());
    }

    #[test]
    fn empty_current_reports_everything_deleted() {
        let baseline = snapshot(&[("/d/a", "h1"), ("/d/b", "h2")]);
        let current = Snapshot::new();

        let report = diff(&baseline, &current);
        assert_eq!(report.deleted, vec!["/d/a", "/d/b"]);
        assert_eq!(report.scanned, 0);
    }

    #[test]
    fn classes_partition_the_union_of_both_key_sets() {
        let baseline = snapshot(&[
            ("/d/same", "h1"),
            ("/d/changed", "h2"),
            ("/d/gone", "h3"),
        ]);
        let current = snapshot(&[
            ("/d/same", "h1"),
            ("/d/changed", "h2-new"),
            ("/d/fresh", "h4"),
        ]);

        let report = diff(&baseline, &current);

        let union: std::collections::BTreeSet<&str> =
            baseline.paths().chain(current.paths()).collect();
        let classified =
            report.added.len() + report.deleted.len() + report.modified.len() + report.unchanged;
        assert_eq!(classified, union.len());

        // No path appears in more than one change list.
        for path in &report.added {
            assert!(!report.deleted.contains(path));
            assert!(!report.modified.contains(path));
        }
        for path in &report.deleted {
            assert!(!report.modified.contains(path));
        }
    }

    #[test]
    fn summary_counts_match_the_report() {
        let baseline = snapshot(&[("/d/a", "h1"), ("/d/b", "h2")]);
        let current = snapshot(&[("/d/a", "h1-new"), ("/d/c", "h3")]);

        let stats = diff(&baseline, &current).summary("/d");
        assert_eq!(stats.directory, "/d");
        assert_eq!(stats.added, 1);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.modified, 1);
        assert_eq!(stats.scanned, 2);
    }
}
