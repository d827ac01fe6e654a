use std::fs;

use dirsnap::{Config, ConfigError, DirectoryArchiver};
use tempfile::tempdir;

/// Full flow: config file on disk -> load -> archiver -> snapshot.
#[test]
fn snapshot_from_config_file() {
    let root = tempdir().unwrap();
    let source = root.path().join("source");
    let archive = root.path().join("archive");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&archive).unwrap();

    fs::write(source.join("a.txt"), "alpha").unwrap();
    fs::write(source.join("b.txt"), "beta").unwrap();
    fs::create_dir(source.join("sub")).unwrap();
    fs::write(source.join("sub").join("c.txt"), "gamma").unwrap();

    let config_path = root.path().join("dirsnap.json");
    let config = Config {
        source_directory: source,
        archive_directory: archive.clone(),
        file_exclusions: vec!["b.txt".to_string()],
        folder_exclusions: Vec::new(),
    };
    config.update(&config_path).unwrap();

    Config::ensure_exists(&config_path).unwrap();
    let loaded = Config::load(&config_path).unwrap();
    let archiver = DirectoryArchiver::new(&loaded).unwrap();
    let destination = archiver.archive().unwrap();

    assert_eq!(destination.parent().unwrap(), archive);
    assert!(destination.join("a.txt").exists());
    assert!(destination.join("sub").join("c.txt").exists());
    assert!(!destination.join("b.txt").exists());
    assert_eq!(
        fs::read_to_string(destination.join("sub").join("c.txt")).unwrap(),
        "gamma"
    );
}

#[test]
fn missing_config_file_is_reported_before_anything_runs() {
    let root = tempdir().unwrap();
    let config_path = root.path().join("dirsnap.json");

    assert!(matches!(
        Config::ensure_exists(&config_path),
        Err(ConfigError::NotFound(_))
    ));
    // Nothing was created along the way.
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn invalid_archive_directory_creates_nothing() {
    let root = tempdir().unwrap();
    let source = root.path().join("source");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("a.txt"), "alpha").unwrap();

    let config = Config {
        source_directory: source.clone(),
        archive_directory: root.path().join("missing-archive"),
        file_exclusions: Vec::new(),
        folder_exclusions: Vec::new(),
    };

    assert!(DirectoryArchiver::new(&config).is_err());
    assert!(!config.archive_directory.exists());
    assert_eq!(fs::read_dir(&source).unwrap().count(), 1);
}
