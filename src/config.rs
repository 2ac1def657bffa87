//! Configuration for jsonkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a jsonkv store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding every document and the operation log
    /// Internal structure:
    ///   {store_dir}/
    ///     ├── log.txt          (operation log)
    ///     ├── merged.json      (merge output)
    ///     └── *.json           (documents)
    pub store_dir: PathBuf,

    /// Write documents pretty-printed instead of on a single line
    pub pretty: bool,

    // -------------------------------------------------------------------------
    // Operation Log Configuration
    // -------------------------------------------------------------------------
    /// File name of the operation log inside `store_dir`
    pub log_file: String,

    // -------------------------------------------------------------------------
    // Merge Configuration
    // -------------------------------------------------------------------------
    /// File name the composite object is written to
    pub merge_output: String,

    /// Package-manager metadata and similar files the merge never reads
    pub excluded_files: Vec<String>,

    /// What to do when one document cannot be read during a merge
    pub merge_policy: MergePolicy,
}

/// Merge failure policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Abort the whole merge on the first unreadable document
    #[default]
    FailFast,

    /// Leave unreadable documents out and report them in the merge result
    SkipFailures,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("./jsonkv_data"),
            pretty: true,
            log_file: "log.txt".to_string(),
            merge_output: "merged.json".to_string(),
            excluded_files: vec!["package.json".to_string(), "package-lock.json".to_string()],
            merge_policy: MergePolicy::FailFast,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the operation log
    pub fn log_path(&self) -> PathBuf {
        self.store_dir.join(&self.log_file)
    }

    /// Files the store manages itself; callers may read but never mutate them
    pub fn is_reserved(&self, name: &str) -> bool {
        name == self.log_file || name == self.merge_output
    }

    /// Files a listing never shows: configured exclusions plus the log
    pub fn unlisted_files(&self) -> Vec<String> {
        let mut names = self.excluded_files.clone();
        names.push(self.log_file.clone());
        names
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store directory
    pub fn store_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_dir = path.into();
        self
    }

    /// Toggle pretty-printed document writes
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Set the operation log file name
    pub fn log_file(mut self, name: impl Into<String>) -> Self {
        self.config.log_file = name.into();
        self
    }

    /// Set the merge output document name
    pub fn merge_output(mut self, name: impl Into<String>) -> Self {
        self.config.merge_output = name.into();
        self
    }

    /// Add a file name the merge should ignore
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_files.push(name.into());
        self
    }

    /// Set the merge failure policy
    pub fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.config.merge_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
