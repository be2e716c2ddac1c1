//! These structs provide the CLI interface for the waybill CLI.

use crate::model::{MonthId, Volume};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// waybill: A command-line tool for keeping a vehicle's fuel waybill ledger.
///
/// The purpose of this program is to record daily waybills (odometer readings
/// and fuel levels) for one vehicle, compute the fuel spent from the seasonal
/// consumption norms, and keep monthly running totals. Month records are kept
/// as JSON snapshots in the ledger home directory.
///
/// Run `waybill init` once to create the ledger home, then `waybill new-month`
/// at the start of each month and `waybill add-day` for each waybill.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the ledger home directory and initialize the configuration file.
    ///
    /// This is the first command you should run. It creates the directory
    /// given by --ledger-home (or WAYBILL_HOME), the months and backups
    /// subdirectories, and a config.json holding the seasonal consumption
    /// norms. Edit config.json if your vehicle's approved rates differ from
    /// the defaults.
    Init,
    /// Start a new month of records.
    ///
    /// Takes the figures carried over from the previous month: the first
    /// waybill number, the odometer reading, the fuel in the tank and in
    /// coupons, and the approved monthly consumption norm. The month is
    /// saved immediately.
    NewMonth(NewMonthArgs),
    /// Record one day's waybill and fold it into the month's totals.
    ///
    /// Any figure you leave out is pre-filled from the ledger: the date
    /// follows the last record, the waybill number increments, the odometer
    /// start is the month's last reading, and the starting fuel is the
    /// previous day's remaining fuel.
    AddDay(AddDayArgs),
    /// Print a month's day table and running totals.
    Show(ShowArgs),
    /// Write a month's day records to a CSV file.
    Export(ExportArgs),
    /// Compute fuel spent and remaining for a single day without recording it.
    Calc(CalcArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the ledger data and configuration is held.
    /// Defaults to ~/waybill
    #[arg(long, env = "WAYBILL_HOME", default_value_t = default_ledger_home())]
    ledger_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, ledger_home: PathBuf) -> Self {
        Self {
            log_level,
            ledger_home: ledger_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn ledger_home(&self) -> &DisplayPath {
        &self.ledger_home
    }
}

/// Args for the `waybill new-month` command.
#[derive(Debug, Parser, Clone)]
pub struct NewMonthArgs {
    /// The first day of the month, as DD.MM.YYYY
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,

    /// The number the month's first waybill will carry
    #[arg(long)]
    waybill: u32,

    /// The odometer reading at the start of the month
    #[arg(long)]
    odometer: u32,

    /// Fuel in the tank at the start of the month, in litres
    #[arg(long)]
    fuel: Volume,

    /// Fuel held as coupons at the start of the month, in litres
    #[arg(long, default_value_t = Volume::default())]
    coupons: Volume,

    /// The approved consumption norm for the month, in litres
    #[arg(long)]
    norm: Volume,
}

impl NewMonthArgs {
    pub fn new(
        date: NaiveDate,
        waybill: u32,
        odometer: u32,
        fuel: Volume,
        coupons: Volume,
        norm: Volume,
    ) -> Self {
        Self {
            date,
            waybill,
            odometer,
            fuel,
            coupons,
            norm,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn waybill(&self) -> u32 {
        self.waybill
    }

    pub fn odometer(&self) -> u32 {
        self.odometer
    }

    pub fn fuel(&self) -> Volume {
        self.fuel
    }

    pub fn coupons(&self) -> Volume {
        self.coupons
    }

    pub fn norm(&self) -> Volume {
        self.norm
    }
}

/// Args for the `waybill add-day` command.
#[derive(Debug, Parser, Clone)]
pub struct AddDayArgs {
    /// The month to append to, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<MonthId>,

    /// The waybill date, as DD.MM.YYYY. Defaults to the day after the last
    /// record.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// The waybill number. Defaults to the next number in sequence.
    #[arg(long)]
    waybill: Option<u32>,

    /// The odometer reading at the start of the day. Defaults to the month's
    /// last reading.
    #[arg(long)]
    odometer_begin: Option<u32>,

    /// The odometer reading at the end of the day
    #[arg(long)]
    odometer_end: u32,

    /// Fuel in the tank at the start of the day, in litres. Defaults to the
    /// previous day's remaining fuel.
    #[arg(long)]
    fuel_begin: Option<Volume>,

    /// Fuel added during the day, in litres
    #[arg(long, default_value_t = Volume::default())]
    fuel_added: Volume,
}

impl AddDayArgs {
    pub fn new(
        month: Option<MonthId>,
        date: Option<NaiveDate>,
        waybill: Option<u32>,
        odometer_begin: Option<u32>,
        odometer_end: u32,
        fuel_begin: Option<Volume>,
        fuel_added: Volume,
    ) -> Self {
        Self {
            month,
            date,
            waybill,
            odometer_begin,
            odometer_end,
            fuel_begin,
            fuel_added,
        }
    }

    pub fn month(&self) -> Option<MonthId> {
        self.month
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn waybill(&self) -> Option<u32> {
        self.waybill
    }

    pub fn odometer_begin(&self) -> Option<u32> {
        self.odometer_begin
    }

    pub fn odometer_end(&self) -> u32 {
        self.odometer_end
    }

    pub fn fuel_begin(&self) -> Option<Volume> {
        self.fuel_begin
    }

    pub fn fuel_added(&self) -> Volume {
        self.fuel_added
    }
}

/// Args for the `waybill show` command.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// The month to print, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<MonthId>,
}

impl ShowArgs {
    pub fn new(month: Option<MonthId>) -> Self {
        Self { month }
    }

    pub fn month(&self) -> Option<MonthId> {
        self.month
    }
}

/// Args for the `waybill export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The month to export, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<MonthId>,

    /// The CSV file to write. Defaults to ./YYYY-MM.csv
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(month: Option<MonthId>, output: Option<PathBuf>) -> Self {
        Self { month, output }
    }

    pub fn month(&self) -> Option<MonthId> {
        self.month
    }

    pub fn output(&self) -> Option<&PathBuf> {
        self.output.as_ref()
    }
}

/// Args for the `waybill calc` command.
#[derive(Debug, Parser, Clone)]
pub struct CalcArgs {
    /// The distance driven, in kilometres
    #[arg(long)]
    distance: u32,

    /// The calendar month (1-12), which selects the seasonal norm
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,

    /// Fuel in the tank at the start of the day, in litres
    #[arg(long, default_value_t = Volume::default())]
    fuel_begin: Volume,

    /// Fuel added during the day, in litres
    #[arg(long, default_value_t = Volume::default())]
    fuel_added: Volume,
}

impl CalcArgs {
    pub fn new(distance: u32, month: u32, fuel_begin: Volume, fuel_added: Volume) -> Self {
        Self {
            distance,
            month,
            fuel_begin,
            fuel_added,
        }
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn fuel_begin(&self) -> Volume {
        self.fuel_begin
    }

    pub fn fuel_added(&self) -> Volume {
        self.fuel_added
    }
}

/// Parses a `DD.MM.YYYY` date, the format waybills are dated with.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%d.%m.%Y")
        .map_err(|e| format!("Invalid date '{s}', expected DD.MM.YYYY: {e}"))
}

fn default_ledger_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("waybill"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --ledger-home or WAYBILL_HOME instead of relying on the default \
                ledger home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("waybill")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
