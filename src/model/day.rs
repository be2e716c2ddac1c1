//! A single day's waybill record.

use crate::model::calc;
use crate::model::norms::{NormTable, Season};
use crate::model::Volume;
use crate::Result;
use anyhow::bail;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The raw figures copied off one waybill, before anything is derived.
#[derive(Debug, Clone, Copy)]
pub struct DayInput {
    pub date: NaiveDate,
    pub waybill_number: u32,
    pub odometer_begin: u32,
    pub odometer_end: u32,
    pub fuel_begin: Volume,
    pub fuel_added: Volume,
}

/// One waybill: the day's raw figures plus every derived fuel figure.
///
/// Records are built in two phases: collect the raw figures into a
/// [`DayInput`], then let [`DayRecord::compute`] fill in the derived fields.
/// A record is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DayRecord {
    date: NaiveDate,
    waybill_number: u32,
    odometer_begin: u32,
    odometer_end: u32,
    fuel_begin: Volume,
    fuel_added: Volume,
    distance_total: u32,
    distance_inside_city: u32,
    distance_outside_city: u32,
    season: Season,
    fuel_spent: Volume,
    fuel_end: Volume,
}

impl DayRecord {
    /// Derives the distance split, season, fuel spent and fuel remaining
    /// from the raw figures.
    ///
    /// # Errors
    /// Returns an error if the odometer ran backwards, which would otherwise
    /// produce a negative distance and negative consumption.
    pub fn compute(input: DayInput, norms: &NormTable, intercity_threshold: u32) -> Result<Self> {
        if input.odometer_end < input.odometer_begin {
            bail!(
                "Odometer at end of day ({}) is less than at start of day ({})",
                input.odometer_end,
                input.odometer_begin
            );
        }
        let split = calc::split_distance(input.odometer_end - input.odometer_begin, intercity_threshold);
        let season = Season::of_month(input.date.month());
        let fuel_spent = calc::consumption(&split, norms.for_season(season));
        let fuel_end = calc::remaining(input.fuel_begin, fuel_spent, input.fuel_added);
        Ok(Self {
            date: input.date,
            waybill_number: input.waybill_number,
            odometer_begin: input.odometer_begin,
            odometer_end: input.odometer_end,
            fuel_begin: input.fuel_begin,
            fuel_added: input.fuel_added,
            distance_total: split.total(),
            distance_inside_city: split.inside_city(),
            distance_outside_city: split.outside_city(),
            season,
            fuel_spent,
            fuel_end,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn waybill_number(&self) -> u32 {
        self.waybill_number
    }

    pub fn odometer_begin(&self) -> u32 {
        self.odometer_begin
    }

    pub fn odometer_end(&self) -> u32 {
        self.odometer_end
    }

    pub fn fuel_begin(&self) -> Volume {
        self.fuel_begin
    }

    pub fn fuel_added(&self) -> Volume {
        self.fuel_added
    }

    pub fn distance_total(&self) -> u32 {
        self.distance_total
    }

    pub fn distance_inside_city(&self) -> u32 {
        self.distance_inside_city
    }

    pub fn distance_outside_city(&self) -> u32 {
        self.distance_outside_city
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn fuel_spent(&self) -> Volume {
        self.fuel_spent
    }

    pub fn fuel_end(&self) -> Volume {
        self.fuel_end
    }

    /// Renders the waybill as the classic label/value printout.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&"-".repeat(79));
        out.push_str("\nWAYBILL\n\n");
        out.push_str(&format!("date:                 {}\n", self.date));
        out.push_str(&format!("waybill number:       {}\n", self.waybill_number));
        out.push_str(&format!("odometer at start:    {}\n", self.odometer_begin));
        out.push_str(&format!("odometer at end:      {}\n", self.odometer_end));
        out.push_str(&format!("total distance:       {}\n", self.distance_total));
        out.push_str(&format!("in-city distance:     {}\n", self.distance_inside_city));
        out.push_str(&format!("out-of-city distance: {}\n", self.distance_outside_city));
        out.push_str(&format!("season:               {}\n", self.season));
        out.push_str(&format!("fuel at start:        {}\n", self.fuel_begin));
        out.push_str(&format!("fuel added:           {}\n", self.fuel_added));
        out.push_str(&format!("fuel spent:           {}\n", self.fuel_spent));
        out.push_str(&format!("fuel remaining:       {}\n", self.fuel_end));
        out.push_str(&"-".repeat(79));
        out
    }
}
