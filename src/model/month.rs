//! A month of waybill records and its running totals.

use crate::model::{DayRecord, Volume};
use crate::Result;
use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::warn;

/// A year and month, written `YYYY-MM`. Names the month's snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthId {
    year: i32,
    month: u32,
}

impl MonthId {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Month must be between 1 and 12, got {month}");
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl From<NaiveDate> for MonthId {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl Display for MonthId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .split_once('-')
            .with_context(|| format!("Expected YYYY-MM, got '{s}'"))?;
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in '{s}'"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month in '{s}'"))?;
        Self::new(year, month)
    }
}

/// A month's waybills and the running totals folded over them.
///
/// The starting figures are fixed at construction; `add_day` appends a
/// waybill and rolls the end-of-month totals forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthRecord {
    date_begin: NaiveDate,
    waybill_number_begin: u32,
    odometer_begin: u32,
    /// Fuel in the tank at the start of the month.
    fuel_natural_begin: Volume,
    /// Fuel held as coupons at the start of the month.
    fuel_coupon_begin: Volume,
    /// The approved consumption allowance for the month.
    fuel_month_norm: Volume,
    days: Vec<DayRecord>,
    waybill_number_end: u32,
    odometer_end: u32,
    /// Cumulative fuel spent across all recorded days.
    fuel_spent: Volume,
    /// Fuel stock remaining out of tank + coupons + monthly allowance.
    fuel_natural_end: Volume,
    fuel_coupon_end: Volume,
}

impl MonthRecord {
    pub fn new(
        date_begin: NaiveDate,
        waybill_number_begin: u32,
        odometer_begin: u32,
        fuel_natural_begin: Volume,
        fuel_coupon_begin: Volume,
        fuel_month_norm: Volume,
    ) -> Self {
        // The month's available stock: tank + coupons + the monthly
        // allowance. Each recorded day draws its consumption from it.
        let fuel_natural_end = Volume::rounded(
            fuel_natural_begin.value() + fuel_coupon_begin.value() + fuel_month_norm.value(),
        );
        Self {
            date_begin,
            waybill_number_begin,
            odometer_begin,
            fuel_natural_begin,
            fuel_coupon_begin,
            fuel_month_norm,
            days: Vec::new(),
            waybill_number_end: waybill_number_begin,
            odometer_end: odometer_begin,
            fuel_spent: Volume::default(),
            fuel_natural_end,
            fuel_coupon_end: Volume::default(),
        }
    }

    /// Appends a day and folds it into the end-of-month totals.
    pub fn add_day(&mut self, day: DayRecord) {
        if day.odometer_begin() != self.odometer_end {
            warn!(
                "Waybill {} starts at odometer {} but the month's last reading is {}",
                day.waybill_number(),
                day.odometer_begin(),
                self.odometer_end
            );
        }
        self.waybill_number_end = day.waybill_number();
        self.odometer_end = day.odometer_end();
        self.fuel_natural_end =
            Volume::rounded(self.fuel_natural_end.value() - day.fuel_spent().value());
        self.fuel_spent = Volume::rounded(self.fuel_spent.value() + day.fuel_spent().value());
        self.days.push(day);
    }

    pub fn id(&self) -> MonthId {
        MonthId::from(self.date_begin)
    }

    pub fn date_begin(&self) -> NaiveDate {
        self.date_begin
    }

    pub fn waybill_number_begin(&self) -> u32 {
        self.waybill_number_begin
    }

    pub fn waybill_number_end(&self) -> u32 {
        self.waybill_number_end
    }

    pub fn odometer_begin(&self) -> u32 {
        self.odometer_begin
    }

    pub fn odometer_end(&self) -> u32 {
        self.odometer_end
    }

    pub fn fuel_natural_begin(&self) -> Volume {
        self.fuel_natural_begin
    }

    pub fn fuel_natural_end(&self) -> Volume {
        self.fuel_natural_end
    }

    pub fn fuel_coupon_begin(&self) -> Volume {
        self.fuel_coupon_begin
    }

    pub fn fuel_coupon_end(&self) -> Volume {
        self.fuel_coupon_end
    }

    pub fn fuel_month_norm(&self) -> Volume {
        self.fuel_month_norm
    }

    pub fn fuel_spent(&self) -> Volume {
        self.fuel_spent
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn last_day(&self) -> Option<&DayRecord> {
        self.days.last()
    }

    /// Renders the month: the day table followed by the totals block.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&"-".repeat(79));
        out.push_str(&format!("\nMONTH {}\n\n", self.id()));

        if self.days.is_empty() {
            out.push_str("No records yet.\n");
        } else {
            out.push_str(&format!("Records: {}\n\n", self.days.len()));
            out.push_str(&format!(
                "{:>12}{:>9}{:>10}{:>7}{:>11}{:>7}{:>9}{:>9}{:>9}\n",
                "DATE", "WAYBILL", "ODOMETER", "CITY", "INTERCITY", "TOTAL", "SPENT", "LEFT",
                "ADDED"
            ));
            for day in &self.days {
                out.push_str(&format!(
                    "{:>12}{:>9}{:>10}{:>7}{:>11}{:>7}{:>9}{:>9}{:>9}\n",
                    day.date().to_string(),
                    day.waybill_number(),
                    day.odometer_end(),
                    day.distance_inside_city(),
                    day.distance_outside_city(),
                    day.distance_total(),
                    day.fuel_spent().to_string(),
                    day.fuel_end().to_string(),
                    day.fuel_added().to_string(),
                ));
            }
        }

        out.push('\n');
        out.push_str(&format!("start date:             {}\n", self.date_begin));
        out.push_str(&format!(
            "first waybill number:   {}\n",
            self.waybill_number_begin
        ));
        out.push_str(&format!(
            "last waybill number:    {}\n",
            self.waybill_number_end
        ));
        out.push_str(&format!("odometer at start:      {}\n", self.odometer_begin));
        out.push_str(&format!("odometer at end:        {}\n", self.odometer_end));
        out.push_str(&format!(
            "fuel at start:          {}\n",
            self.fuel_natural_begin
        ));
        out.push_str(&format!(
            "fuel stock remaining:   {}\n",
            self.fuel_natural_end
        ));
        out.push_str(&format!(
            "coupons at start:       {}\n",
            self.fuel_coupon_begin
        ));
        out.push_str(&format!(
            "coupons remaining:      {}\n",
            self.fuel_coupon_end
        ));
        out.push_str(&format!("monthly norm:           {}\n", self.fuel_month_norm));
        out.push_str(&format!("fuel spent:             {}\n", self.fuel_spent));
        out.push_str(&"-".repeat(79));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::norms::{NormTable, INTERCITY_ROUND_TRIP_KM};
    use crate::model::DayInput;
    use rust_decimal::Decimal;

    fn month() -> MonthRecord {
        MonthRecord::new(
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            100,
            10_000,
            "50.00".parse().unwrap(),
            "30".parse().unwrap(),
            "250".parse().unwrap(),
        )
    }

    fn day(
        base: &MonthRecord,
        date: NaiveDate,
        waybill_number: u32,
        odometer_end: u32,
    ) -> DayRecord {
        let fuel_begin = base
            .last_day()
            .map(|d| d.fuel_end())
            .unwrap_or_else(|| base.fuel_natural_begin());
        DayRecord::compute(
            DayInput {
                date,
                waybill_number,
                odometer_begin: base.odometer_end(),
                odometer_end,
                fuel_begin,
                fuel_added: Volume::default(),
            },
            &NormTable::default(),
            INTERCITY_ROUND_TRIP_KM,
        )
        .unwrap()
    }

    #[test]
    fn test_new_month_totals() {
        let m = month();
        assert_eq!(m.waybill_number_end(), 100);
        assert_eq!(m.odometer_end(), 10_000);
        assert!(m.fuel_spent().is_zero());
        // tank + coupons + monthly norm
        assert_eq!(m.fuel_natural_end().to_string(), "330.00");
        assert!(m.fuel_coupon_end().is_zero());
        assert!(m.days().is_empty());
    }

    #[test]
    fn test_add_day_updates_totals() {
        let mut m = month();
        let d = day(
            &m,
            NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
            101,
            10_400,
        );
        m.add_day(d);

        assert_eq!(m.days().len(), 1);
        assert_eq!(m.waybill_number_end(), 101);
        assert_eq!(m.odometer_end(), 10_400);
        assert_eq!(m.fuel_spent().to_string(), "35.72");
        assert_eq!(m.fuel_natural_end().to_string(), "294.28");
    }

    #[test]
    fn test_cumulative_spent_is_fold_over_days() {
        let mut m = month();
        for (i, km) in [400u32, 150, 80].iter().enumerate() {
            let date = NaiveDate::from_ymd_opt(2026, 6, 2 + i as u32).unwrap();
            let d = day(&m, date, 101 + i as u32, m.odometer_end() + km);
            m.add_day(d);
        }

        let sum: Decimal = m.days().iter().map(|d| d.fuel_spent().value()).sum();
        assert_eq!(m.fuel_spent().value(), sum);
        assert_eq!(
            m.odometer_end(),
            m.days().last().unwrap().odometer_end()
        );
        assert_eq!(m.waybill_number_end(), 103);
        assert_eq!(
            m.fuel_natural_end().value(),
            Decimal::from_str("330.00").unwrap() - sum
        );
    }

    #[test]
    fn test_month_id_from_date() {
        assert_eq!(month().id().to_string(), "2026-06");
    }

    #[test]
    fn test_month_id_parse() {
        let id: MonthId = "2026-08".parse().unwrap();
        assert_eq!(id.year(), 2026);
        assert_eq!(id.month(), 8);
        assert_eq!(id.to_string(), "2026-08");
    }

    #[test]
    fn test_month_id_parse_rejects_bad_input() {
        assert!("2026".parse::<MonthId>().is_err());
        assert!("2026-13".parse::<MonthId>().is_err());
        assert!("2026-00".parse::<MonthId>().is_err());
        assert!("abcd-08".parse::<MonthId>().is_err());
    }

    #[test]
    fn test_render_lists_days() {
        let mut m = month();
        let d = day(
            &m,
            NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
            101,
            10_400,
        );
        m.add_day(d);
        let rendered = m.render();
        assert!(rendered.contains("MONTH 2026-06"));
        assert!(rendered.contains("Records: 1"));
        assert!(rendered.contains("2026-06-02"));
        assert!(rendered.contains("35.72"));
    }

    #[test]
    fn test_render_empty_month() {
        let rendered = month().render();
        assert!(rendered.contains("No records yet."));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut m = month();
        let d = day(
            &m,
            NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
            101,
            10_400,
        );
        m.add_day(d);
        let json = serde_json::to_string_pretty(&m).unwrap();
        let read: MonthRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(m, read);
    }
}
