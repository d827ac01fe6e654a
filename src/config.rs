use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration record for a snapshot run.
///
/// Stored as a JSON object with 4-space indentation. Both directory paths
/// must point at existing directories by the time an archiver is built from
/// this record; the store itself does not validate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub source_directory: PathBuf,
    pub archive_directory: PathBuf,
    pub file_exclusions: Vec<String>,
    pub folder_exclusions: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file '{0}' was not found")]
    NotFound(PathBuf),

    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Config {
    /// Default config location in the user's home directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".dirsnap.json"))
    }

    /// Template record for a fresh setup: archives land in an `Archive`
    /// subfolder of the source, no exclusions beyond the implicit ones.
    pub fn template(source: &Path) -> Self {
        Self {
            source_directory: source.to_path_buf(),
            archive_directory: source.join("Archive"),
            file_exclusions: Vec::new(),
            folder_exclusions: Vec::new(),
        }
    }

    /// Fail if no config file exists at `path`. Never creates one.
    pub fn ensure_exists(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            Ok(())
        } else {
            Err(ConfigError::NotFound(path.to_path_buf()))
        }
    }

    /// Write `defaults` to `path`, overwriting any existing file.
    pub fn create_default(path: &Path, defaults: &Config) -> Result<(), ConfigError> {
        defaults.update(path)
    }

    /// Parse `path` as UTF-8 JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Serialize this record to `path`, overwriting any existing file.
    ///
    /// Plain write, no temp-file-then-rename: a failure partway through can
    /// leave a truncated file behind.
    pub fn update(&self, path: &Path) -> Result<(), ConfigError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        fs::write(path, buf)?;
        Ok(())
    }

    /// Print the record the way `dirsnap show` renders it.
    pub fn display(&self) {
        use colored::*;

        println!("{}", "CURRENT CONFIGURATION".bold().color(crate::colors::HEADER));
        println!();
        println!(
            "{} Source directory:  {}",
            "•".cyan(),
            self.source_directory.display().to_string().color(crate::colors::PATH)
        );
        println!(
            "{} Archive directory: {}",
            "•".cyan(),
            self.archive_directory.display().to_string().color(crate::colors::PATH)
        );

        println!("{} File exclusions ({}):", "•".cyan(), self.file_exclusions.len());
        for name in &self.file_exclusions {
            println!("  - {}", name);
        }
        println!("{} Folder exclusions ({}):", "•".cyan(), self.folder_exclusions.len());
        for name in &self.folder_exclusions {
            println!("  - {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Config {
        Config {
            source_directory: PathBuf::from("/data/reports"),
            archive_directory: PathBuf::from("/data/reports/Archive"),
            file_exclusions: vec!["thumbs.db".to_string()],
            folder_exclusions: vec!["tmp".to_string()],
        }
    }

    #[test]
    fn ensure_exists_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        match Config::ensure_exists(&path) {
            Err(ConfigError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn ensure_exists_passes_for_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        assert!(Config::ensure_exists(&path).is_ok());
    }

    #[test]
    fn create_default_writes_four_space_indented_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::create_default(&path, &sample()).unwrap();

        let data = fs::read_to_string(&path).unwrap();
        assert!(data.contains("\n    \"source_directory\""));
        assert!(data.contains("\n    \"file_exclusions\""));
    }

    #[test]
    fn update_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "old contents").unwrap();

        sample().update(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn load_round_trips_the_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = sample();
        config.update(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ \"source_directory\": ").unwrap();

        match Config::load(&path) {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn load_reports_io_error_for_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.json");

        match Config::load(&path) {
            Err(ConfigError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn template_nests_archive_under_source() {
        let config = Config::template(Path::new("/work/docs"));
        assert_eq!(config.archive_directory, PathBuf::from("/work/docs/Archive"));
        assert!(config.file_exclusions.is_empty());
        assert!(config.folder_exclusions.is_empty());
    }
}
