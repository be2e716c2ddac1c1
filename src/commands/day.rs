use crate::args::AddDayArgs;
use crate::commands::month::resolve_month;
use crate::commands::Out;
use crate::model::{DayInput, DayRecord, MonthRecord, Volume};
use crate::store::Store;
use crate::{Config, Result};
use chrono::NaiveDate;
use tracing::warn;

/// Records one day's waybill: pre-fills whatever the user left out from the
/// ledger, computes the day's fuel figures, folds the day into the month's
/// totals, and saves the month.
pub fn add_day(config: &Config, args: &AddDayArgs) -> Result<Out<DayRecord>> {
    let store = Store::new(config);
    let mut month = store.load(resolve_month(args.month()))?;

    let input = DayInput {
        date: args.date().unwrap_or_else(|| next_date(&month)),
        waybill_number: args.waybill().unwrap_or_else(|| next_waybill(&month)),
        odometer_begin: args.odometer_begin().unwrap_or_else(|| month.odometer_end()),
        odometer_end: args.odometer_end(),
        fuel_begin: args.fuel_begin().unwrap_or_else(|| carried_fuel(&month)),
        fuel_added: args.fuel_added(),
    };

    let day = DayRecord::compute(input, config.norms(), config.intercity_threshold_km())?;
    if day.fuel_end().is_negative() {
        warn!(
            "Waybill {} leaves a negative fuel balance of {}",
            day.waybill_number(),
            day.fuel_end()
        );
    }

    month.add_day(day.clone());
    store.save(&month)?;

    Ok(Out::new(day.render(), day))
}

/// The date of the next waybill: the day after the last record, or the
/// month's start date for the first record.
fn next_date(month: &MonthRecord) -> NaiveDate {
    month
        .last_day()
        .map(|d| d.date().succ_opt().unwrap_or_else(|| d.date()))
        .unwrap_or_else(|| month.date_begin())
}

/// The number of the next waybill: the month's starting number for the first
/// record, then one past the last recorded number.
fn next_waybill(month: &MonthRecord) -> u32 {
    if month.days().is_empty() {
        month.waybill_number_begin()
    } else {
        month.waybill_number_end() + 1
    }
}

/// The fuel in the tank at the start of the next day: the previous day's
/// remaining fuel, or the month's starting fuel for the first record.
fn carried_fuel(month: &MonthRecord) -> Volume {
    month
        .last_day()
        .map(|d| d.fuel_end())
        .unwrap_or_else(|| month.fuel_natural_begin())
}
