//! Path resolution for sleeptrack configuration and data files.
//!
//! All sleeptrack data is stored in `~/.sleeptrack/`:
//! - `config.yaml` - Main configuration file
//! - `sleep.db` - SQLite database holding the nights table

use std::path::PathBuf;

use crate::error::SleepError;

/// Paths to sleeptrack configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.sleeptrack/`
    pub root: PathBuf,
    /// Config file: `~/.sleeptrack/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.sleeptrack/sleep.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SleepError> {
        let home = std::env::var("HOME").map_err(|_| {
            SleepError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".sleeptrack")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("sleep.db"),
            root,
        }
    }

    /// Resolve paths from an optional override, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory cannot be determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, SleepError> {
        root.map_or_else(Self::new, |r| Ok(Self::with_root(r)))
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), SleepError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                SleepError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-sleeptrack");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("sleep.db"));
    }

    #[test]
    fn test_resolve_prefers_override() {
        let root = PathBuf::from("/tmp/elsewhere");
        let paths = Paths::resolve(Some(root.clone())).unwrap();
        assert_eq!(paths.root, root);
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("data"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
    }
}
