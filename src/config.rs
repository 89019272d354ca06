//! Locations of the log directory and the two output stores.

use std::path::{Path, PathBuf};

/// Default name of the output directory, relative to the log directory.
pub const DEFAULT_OUT_DIR: &str = "out";
/// Default file name of the combined line store.
pub const DEFAULT_COMBINED_FILE: &str = "combined.log";
/// Default file name of the CSV report.
pub const DEFAULT_REPORT_FILE: &str = "report.csv";

/// Paths used by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory whose regular files are read as access logs.
    pub logs_dir: PathBuf,
    /// Directory holding the combined store and the report.
    pub out_dir: PathBuf,
    /// File name of the combined store inside `out_dir`.
    pub combined_file: String,
    /// File name of the report inside `out_dir`.
    pub report_file: String,
}

impl Config {
    /// Configuration with the default `out/` layout under the log directory.
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        let logs_dir = logs_dir.into();
        let out_dir = logs_dir.join(DEFAULT_OUT_DIR);

        Self {
            logs_dir,
            out_dir,
            combined_file: DEFAULT_COMBINED_FILE.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
        }
    }

    /// Use another output directory.
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Full path of the combined store.
    pub fn combined_path(&self) -> PathBuf {
        self.out_dir.join(&self.combined_file)
    }

    /// Full path of the report.
    pub fn report_path(&self) -> PathBuf {
        self.out_dir.join(&self.report_file)
    }

    /// Whether a path is one of the output stores.
    pub fn is_store(&self, path: &Path) -> bool {
        path == self.combined_path() || path == self.report_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = Config::new("/var/log/shop");
        assert_eq!(config.out_dir, Path::new("/var/log/shop/out"));
        assert_eq!(
            config.combined_path(),
            Path::new("/var/log/shop/out/combined.log")
        );
        assert_eq!(config.report_path(), Path::new("/var/log/shop/out/report.csv"));
    }

    #[test]
    fn test_with_out_dir() {
        let config = Config::new("logs").with_out_dir("logs");
        assert_eq!(config.combined_path(), Path::new("logs/combined.log"));
        assert!(config.is_store(Path::new("logs/report.csv")));
        assert!(!config.is_store(Path::new("logs/access.log")));
    }
}
