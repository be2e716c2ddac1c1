//! Month snapshot persistence.
//!
//! One month's aggregate state is saved as a self-describing pretty JSON
//! file named after its `MonthId`, e.g. `months/2026-08.json`. Every
//! `DayRecord` and `MonthRecord` field is written explicitly so a snapshot
//! survives being read back by a later version of the tool.

use crate::backup::Backup;
use crate::model::{MonthId, MonthRecord};
use crate::{fs, Config, Result};
use anyhow::{bail, Context};
use std::path::PathBuf;

/// File-based month repository.
#[derive(Debug, Clone)]
pub struct Store {
    months_dir: PathBuf,
    backup: Backup,
}

impl Store {
    pub fn new(config: &Config) -> Self {
        Self {
            months_dir: config.months().to_path_buf(),
            backup: Backup::new(config),
        }
    }

    fn month_path(&self, id: MonthId) -> PathBuf {
        self.months_dir.join(format!("{id}.json"))
    }

    /// Saves a month snapshot, backing up the previous snapshot first.
    ///
    /// Returns the path of the written file.
    pub fn save(&self, month: &MonthRecord) -> Result<PathBuf> {
        let id = month.id();
        let path = self.month_path(id);
        if path.is_file() {
            self.backup.copy_snapshot(&id.to_string(), &path)?;
        }
        let json = serde_json::to_string_pretty(month)
            .with_context(|| format!("Failed to serialize month {id} to JSON"))?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Loads a month snapshot.
    ///
    /// # Errors
    /// Returns an error if no snapshot exists for the month, or if the file
    /// cannot be read or parsed.
    pub fn load(&self, id: MonthId) -> Result<MonthRecord> {
        let path = self.month_path(id);
        if !path.is_file() {
            bail!(
                "No records for month {id}: '{}' does not exist",
                path.display()
            );
        }
        fs::deserialize(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn month() -> MonthRecord {
        MonthRecord::new(
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            100,
            10_000,
            "50.00".parse().unwrap(),
            "0".parse().unwrap(),
            "250".parse().unwrap(),
        )
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("home")).unwrap();
        let store = Store::new(&config);

        let original = month();
        let path = store.save(&original).unwrap();
        assert!(path.ends_with("2026-08.json"));

        let loaded = store.load(original.id()).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_load_missing_month_fails() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("home")).unwrap();
        let store = Store::new(&config);

        let id: MonthId = "2026-01".parse().unwrap();
        let result = store.load(id);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No records for month 2026-01"));
    }

    #[test]
    fn test_second_save_creates_backup() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("home")).unwrap();
        let store = Store::new(&config);

        let m = month();
        store.save(&m).unwrap();
        assert_eq!(std::fs::read_dir(config.backups()).unwrap().count(), 0);

        store.save(&m).unwrap();
        assert_eq!(std::fs::read_dir(config.backups()).unwrap().count(), 1);
    }
}
