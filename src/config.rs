use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

use crate::store::DEFAULT_BASELINE_FILE;

/// Optional configuration file name, looked up in the run directory.
pub const CONFIG_FILE: &str = "integrity.toml";

const DEFAULT_EXPORT_TEMPLATE: &str = "integrity-summary-{timestamp}.txt";

/// Run-directory configuration. Every field is optional; CLI flags take
/// precedence over values set here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the baseline snapshot is stored.
    pub baseline: Option<PathBuf>,
    /// File-name template for exported summaries. `{timestamp}` is replaced
    /// with the local time at export.
    pub export_template: Option<String>,
    /// Number of hashing threads.
    pub threads: Option<usize>,
}

impl Config {
    /// Loads `integrity.toml` from `dir`, falling back to defaults when the
    /// file does not exist. A file that exists but does not parse is an
    /// error, not a silent fallback.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!("No config file at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: '{}'", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: '{}'", path.display()))?;
        debug!("Loaded config from '{}': {:?}", path.display(), config);
        Ok(config)
    }

    pub fn baseline_path(&self) -> PathBuf {
        self.baseline
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASELINE_FILE))
    }

    pub fn export_template(&self) -> &str {
        self.export_template
            .as_deref()
            .unwrap_or(DEFAULT_EXPORT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_config_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();

        assert_eq!(config.baseline_path(), PathBuf::from(DEFAULT_BASELINE_FILE));
        assert_eq!(config.export_template(), DEFAULT_EXPORT_TEMPLATE);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn reads_all_fields_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "baseline = \"/var/lib/integrity/baseline.json\"\n\
             export_template = \"report-{timestamp}.txt\"\n\
             threads = 4\n",
        )
        .unwrap();

        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(
            config.baseline_path(),
            PathBuf::from("/var/lib/integrity/baseline.json")
        );
        assert_eq!(config.export_template(), "report-{timestamp}.txt");
        assert_eq!(config.threads, Some(4));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "basline = \"typo.json\"\n").unwrap();

        assert!(Config::load_or_default(dir.path()).is_err());
    }
}
