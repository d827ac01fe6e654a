use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use fs_extra::dir::CopyOptions;
use thiserror::Error;

use crate::config::Config;

/// Folder-name format of a snapshot, local time at second resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("source directory '{0}' does not exist or is not a directory")]
    InvalidSourceDirectory(PathBuf),

    #[error("archive directory '{0}' does not exist or is not a directory")]
    InvalidArchiveDirectory(PathBuf),

    #[error("snapshot folder '{0}' already exists")]
    DestinationExists(PathBuf),

    #[error("destination subfolder '{0}' already exists")]
    CopyConflict(PathBuf),

    #[error("failed to copy directory tree: {0}")]
    Copy(#[from] fs_extra::error::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One-shot snapshot copier. Validates both configured paths up front,
/// then copies every non-excluded top-level entry of the source into a
/// freshly created timestamped subfolder of the archive directory.
#[derive(Debug, Clone)]
pub struct DirectoryArchiver {
    source: PathBuf,
    archive_dir: PathBuf,
    exclusions: Vec<String>,
}

impl DirectoryArchiver {
    /// Build an archiver from a configuration record.
    ///
    /// Fails if either configured path is missing or not a directory.
    /// Never touches the filesystem beyond those checks.
    pub fn new(config: &Config) -> Result<Self, ArchiveError> {
        if !config.source_directory.is_dir() {
            return Err(ArchiveError::InvalidSourceDirectory(
                config.source_directory.clone(),
            ));
        }
        if !config.archive_directory.is_dir() {
            return Err(ArchiveError::InvalidArchiveDirectory(
                config.archive_directory.clone(),
            ));
        }

        // File exclusions first, then folder exclusions, then the archive
        // folder's own name so a nested archive directory is never copied
        // into itself. Duplicates are kept as given.
        let mut exclusions: Vec<String> = config.file_exclusions.clone();
        exclusions.extend(config.folder_exclusions.iter().cloned());
        if let Some(name) = config.archive_directory.file_name() {
            exclusions.push(name.to_string_lossy().into_owned());
        }

        Ok(Self {
            source: config.source_directory.clone(),
            archive_dir: config.archive_directory.clone(),
            exclusions,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Effective exclusion set, in match order.
    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    /// Run one snapshot, stamped with the current local time.
    ///
    /// Returns the created snapshot folder. Two runs within the same clock
    /// second collide and the second fails with `DestinationExists`; no
    /// suffix disambiguation is attempted. Whatever was copied before a
    /// failure stays on disk.
    pub fn archive(&self) -> Result<PathBuf, ArchiveError> {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.archive_with_stamp(&stamp)
    }

    fn archive_with_stamp(&self, stamp: &str) -> Result<PathBuf, ArchiveError> {
        let destination = self.archive_dir.join(stamp);
        if destination.exists() {
            return Err(ArchiveError::DestinationExists(destination));
        }
        fs::create_dir(&destination)?;

        // Top-level entries only, in directory-listing order. Exclusion
        // matching is exact basename equality and applies only here;
        // nothing below the top level is filtered.
        for entry in fs::read_dir(&self.source)? {
            let entry = entry?;
            let name = entry.file_name();
            if self
                .exclusions
                .iter()
                .any(|excl| name.to_string_lossy() == excl.as_str())
            {
                continue;
            }

            // Classify through the link target so a symlinked file is
            // copied as its content. Broken links and unreadable entries
            // are skipped.
            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(_) => continue,
            };
            if metadata.is_file() {
                copy_file_with_times(&entry.path(), &destination.join(&name))?;
            } else if metadata.is_dir() {
                let target = destination.join(&name);
                if target.exists() {
                    return Err(ArchiveError::CopyConflict(target));
                }
                fs_extra::dir::copy(entry.path(), &destination, &CopyOptions::new())?;
            }
        }

        Ok(destination)
    }

    /// Existing snapshot folders under the archive directory, oldest first.
    ///
    /// Only folders whose names parse as a snapshot timestamp count;
    /// anything else in the archive directory is ignored.
    pub fn list_snapshots(&self) -> Result<Vec<(PathBuf, NaiveDateTime)>, ArchiveError> {
        let mut snapshots = Vec::new();

        for entry in fs::read_dir(&self.archive_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            if let Some(folder_name) = path.file_name() {
                let name = folder_name.to_string_lossy();
                if let Ok(stamp) = NaiveDateTime::parse_from_str(&name, TIMESTAMP_FORMAT) {
                    snapshots.push((path, stamp));
                }
            }
        }

        snapshots.sort_by_key(|(_, stamp)| *stamp);
        Ok(snapshots)
    }
}

/// Copy one regular file, carrying the source's modification time over
/// to the copy. Permission bits are already handled by `fs::copy`.
fn copy_file_with_times(source: &Path, dest: &Path) -> Result<(), std::io::Error> {
    fs::copy(source, dest)?;

    if let Ok(modified) = fs::metadata(source).and_then(|m| m.modified()) {
        let copy = fs::OpenOptions::new().write(true).open(dest)?;
        copy.set_times(fs::FileTimes::new().set_modified(modified))?;
    }
    Ok(())
}

/// Total size in bytes of everything under `path`.
pub fn dir_size(path: &Path) -> Result<u64, std::io::Error> {
    let mut total = 0u64;

    if path.is_dir() {
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                total += dir_size(&path)?;
            } else {
                total += fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            }
        }
    }

    Ok(total)
}
