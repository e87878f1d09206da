//! Store configuration.

use std::path::PathBuf;

/// Store configuration options.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the JSON file.
    pub path: PathBuf,
    /// Create missing parent directories before writing.
    pub create_parent_dirs: bool,
    /// Emit a debug event for every operation.
    pub verbose: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data.json"),
            create_parent_dirs: true,
            verbose: false,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set create_parent_dirs flag.
    pub fn create_parent_dirs(mut self, value: bool) -> Self {
        self.create_parent_dirs = value;
        self
    }

    /// Set verbose flag.
    pub fn verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = StoreConfig::new("/tmp/a/b.json")
            .create_parent_dirs(false)
            .verbose(true);
        assert_eq!(config.path, PathBuf::from("/tmp/a/b.json"));
        assert!(!config.create_parent_dirs);
        assert!(config.verbose);
        assert!(StoreConfig::default().create_parent_dirs);
    }
}
