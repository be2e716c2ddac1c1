use crate::args::NewMonthArgs;
use crate::commands::Out;
use crate::model::norms::Season;
use crate::model::{MonthId, MonthRecord, Volume};
use crate::store::Store;
use crate::{Config, Result};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Starts a new month of records and saves it immediately.
pub fn new_month(config: &Config, args: &NewMonthArgs) -> Result<Out<MonthRecord>> {
    let month = MonthRecord::new(
        args.date(),
        args.waybill(),
        args.odometer(),
        args.fuel(),
        args.coupons(),
        args.norm(),
    );
    let path = Store::new(config).save(&month)?;
    debug!("Saved month {} to {}", month.id(), path.display());
    Ok(Out::new(month.render(), month))
}

/// Loads a month and renders its day table and totals.
pub fn show(config: &Config, month: Option<MonthId>) -> Result<Out<MonthRecord>> {
    let id = resolve_month(month);
    let month = Store::new(config).load(id)?;
    Ok(Out::new(month.render(), month))
}

/// One day record flattened into a CSV row.
#[derive(Debug, Clone, Serialize)]
struct CsvRow {
    date: NaiveDate,
    waybill_number: u32,
    odometer_begin: u32,
    odometer_end: u32,
    distance_inside_city: u32,
    distance_outside_city: u32,
    distance_total: u32,
    season: Season,
    fuel_begin: Volume,
    fuel_added: Volume,
    fuel_spent: Volume,
    fuel_end: Volume,
}

/// Writes a month's day records to a CSV file.
pub fn export(
    config: &Config,
    month: Option<MonthId>,
    output: Option<&PathBuf>,
) -> Result<Out<PathBuf>> {
    let id = resolve_month(month);
    let month = Store::new(config).load(id)?;

    let path = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(format!("{id}.csv")));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Unable to create CSV file {}", path.display()))?;
    for day in month.days() {
        writer.serialize(CsvRow {
            date: day.date(),
            waybill_number: day.waybill_number(),
            odometer_begin: day.odometer_begin(),
            odometer_end: day.odometer_end(),
            distance_inside_city: day.distance_inside_city(),
            distance_outside_city: day.distance_outside_city(),
            distance_total: day.distance_total(),
            season: day.season(),
            fuel_begin: day.fuel_begin(),
            fuel_added: day.fuel_added(),
            fuel_spent: day.fuel_spent(),
            fuel_end: day.fuel_end(),
        })?;
    }
    writer
        .flush()
        .with_context(|| format!("Unable to write CSV file {}", path.display()))?;

    Ok(Out::new(
        format!(
            "Wrote {} day records for month {id} to '{}'",
            month.days().len(),
            path.display()
        ),
        path,
    ))
}

/// The month to operate on when none was given: the current calendar month.
pub(super) fn resolve_month(month: Option<MonthId>) -> MonthId {
    month.unwrap_or_else(|| MonthId::from(Local::now().date_naive()))
}
