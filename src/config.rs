//! Configuration file handling for the waybill ledger.
//!
//! The configuration file is stored at `$WAYBILL_HOME/config.json` and
//! contains the seasonal consumption norms, the intercity distance threshold
//! and the backup rotation depth.

use crate::model::norms::{NormTable, INTERCITY_ROUND_TRIP_KM};
use crate::{fs, Result};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "waybill";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const MONTHS: &str = "months";
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$WAYBILL_HOME` and from there it
/// loads `$WAYBILL_HOME/config.json`. It provides the paths to the month
/// snapshots and the backups directory within the ledger home.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    months: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the ledger home, its subdirectories, and an initial
    /// `config.json` with the default norms.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the ledger home,
    ///   e.g. `$HOME/waybill`
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        fs::create_dir_all(&maybe_relative)?;

        // Canonicalize the directory path
        let root = fs::canonicalize(&maybe_relative)?;

        // Create the subdirectories
        let months_dir = root.join(MONTHS);
        fs::create_dir_all(&months_dir)?;
        let backups_dir = root.join(BACKUPS);
        fs::create_dir_all(&backups_dir)?;

        // Create and save an initial ConfigFile with the default norms
        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        Ok(Self {
            root,
            months: months_dir,
            backups: backups_dir,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the ledger home exists and that the config file exists
    /// - load the config file
    /// - validate that the months and backups directories exist
    /// - return the loaded configuration object
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = fs::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'waybill init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;

        let config = Self {
            months: root.join(MONTHS),
            backups: root.join(BACKUPS),
            root,
            config_path,
            config_file,
        };
        if !config.months.is_dir() {
            bail!(
                "The months directory is missing '{}'",
                config.months.display()
            )
        }
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn months(&self) -> &Path {
        &self.months
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn norms(&self) -> &NormTable {
        &self.config_file.norms
    }

    pub fn intercity_threshold_km(&self) -> u32 {
        self.config_file.intercity_threshold_km
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "waybill",
///   "config_version": 1,
///   "norms": {
///     "summer": { "inside_city": "0.093", "outside_city": "0.089" },
///     "winter": { "inside_city": "0.102", "outside_city": "0.098" }
///   },
///   "intercity_threshold_km": 370,
///   "backup_copies": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "waybill"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Seasonal per-kilometre consumption norms
    #[serde(default)]
    norms: NormTable,

    /// Distance attributed to the intercity round trip, in kilometres
    #[serde(default = "default_threshold")]
    intercity_threshold_km: u32,

    /// Number of backup copies to keep per month file
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,
}

fn default_threshold() -> u32 {
    INTERCITY_ROUND_TRIP_KM
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            norms: NormTable::default(),
            intercity_threshold_km: INTERCITY_ROUND_TRIP_KM,
            backup_copies: BACKUP_COPIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: ConfigFile = fs::deserialize(path.as_ref())?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
    }
}
