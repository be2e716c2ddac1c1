//! Backup management for month snapshot files.

use crate::{fs, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings
/// it needs. Create a new instance via `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
        }
    }

    /// Copies a month snapshot file into the backups directory.
    ///
    /// The filename format is `{prefix}.YYYY-MM-DD-NNN.json` where `prefix`
    /// is the month id and NNN is a sequence number. Automatically rotates
    /// old backups, keeping only `backup_copies` files per prefix.
    ///
    /// Returns the path to the created backup file.
    pub fn copy_snapshot(&self, prefix: &str, source: &Path) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(prefix, &date)?;
        let filename = format!("{prefix}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        fs::copy(source, &path)?;

        self.rotate(prefix)?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix
    /// and date, and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;

        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry.context("Failed to read directory entry")?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }

        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the
    /// given prefix.
    fn rotate(&self, prefix: &str) -> Result<()> {
        // Collect all matching backup files
        let mut files: Vec<(PathBuf, String)> = Vec::new();

        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry.context("Failed to read directory entry")?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().to_string();

            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // Sort by filename (which sorts by date and sequence number due to the format)
        files.sort_by(|a, b| a.1.cmp(&b.1));

        // Delete oldest files if we have more than backup_copies
        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            fs::remove(&path)?;
        }

        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    // Pattern: {prefix}.{date}-{NNN}.json
    let expected_start = format!("{prefix}.{date}-");

    let remainder = filename.strip_prefix(&expected_start)?;
    let seq_str = remainder.strip_suffix(".json")?;

    seq_str.parse().ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}
