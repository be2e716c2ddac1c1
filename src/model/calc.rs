//! The fuel balance calculation.
//!
//! Pure functions over a day's scalar inputs: split the total distance into
//! in-city and out-of-city portions, price each portion at the seasonal
//! per-kilometre rate, and work out the fuel left in the tank.

use crate::model::norms::SeasonNorm;
use crate::model::Volume;
use rust_decimal::Decimal;

/// A day's distance, split between city and intercity driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceSplit {
    inside_city: u32,
    outside_city: u32,
}

impl DistanceSplit {
    pub fn inside_city(&self) -> u32 {
        self.inside_city
    }

    pub fn outside_city(&self) -> u32 {
        self.outside_city
    }

    pub fn total(&self) -> u32 {
        self.inside_city + self.outside_city
    }
}

/// Splits a day's total distance at the intercity threshold.
///
/// The first `threshold` kilometres of a long enough day are attributed to
/// the intercity round trip; whatever remains was driven in the city. A day
/// shorter than the threshold is city driving in its entirety.
pub fn split_distance(total: u32, threshold: u32) -> DistanceSplit {
    let outside_city = total.min(threshold);
    DistanceSplit {
        inside_city: total - outside_city,
        outside_city,
    }
}

/// Computes the fuel consumed over a split distance at the given seasonal
/// rates, rounded to two fractional digits half-up.
pub fn consumption(split: &DistanceSplit, norm: &SeasonNorm) -> Volume {
    let spent = Decimal::from(split.outside_city) * norm.outside_city()
        + Decimal::from(split.inside_city) * norm.inside_city();
    Volume::rounded(spent)
}

/// Computes the fuel left in the tank at the end of the day, rounded to two
/// fractional digits half-up.
pub fn remaining(fuel_begin: Volume, spent: Volume, fuel_added: Volume) -> Volume {
    Volume::rounded(fuel_begin.value() - spent.value() + fuel_added.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::norms::{NormTable, Season, INTERCITY_ROUND_TRIP_KM};
    use std::str::FromStr;

    #[test]
    fn test_split_below_threshold() {
        let split = split_distance(200, INTERCITY_ROUND_TRIP_KM);
        assert_eq!(split.inside_city(), 200);
        assert_eq!(split.outside_city(), 0);
        assert_eq!(split.total(), 200);
    }

    #[test]
    fn test_split_at_threshold() {
        let split = split_distance(370, INTERCITY_ROUND_TRIP_KM);
        assert_eq!(split.inside_city(), 0);
        assert_eq!(split.outside_city(), 370);
    }

    #[test]
    fn test_split_just_below_threshold() {
        let split = split_distance(369, INTERCITY_ROUND_TRIP_KM);
        assert_eq!(split.inside_city(), 369);
        assert_eq!(split.outside_city(), 0);
    }

    #[test]
    fn test_split_above_threshold() {
        let split = split_distance(400, INTERCITY_ROUND_TRIP_KM);
        assert_eq!(split.inside_city(), 30);
        assert_eq!(split.outside_city(), 370);
        assert_eq!(split.total(), 400);
    }

    #[test]
    fn test_split_zero() {
        let split = split_distance(0, INTERCITY_ROUND_TRIP_KM);
        assert_eq!(split.inside_city(), 0);
        assert_eq!(split.outside_city(), 0);
    }

    #[test]
    fn test_consumption_summer_long_day() {
        // 400 km in June: 370 * 0.089 + 30 * 0.093 = 32.93 + 2.79 = 35.72
        let norms = NormTable::default();
        let split = split_distance(400, INTERCITY_ROUND_TRIP_KM);
        let spent = consumption(&split, norms.for_season(Season::of_month(6)));
        assert_eq!(spent.to_string(), "35.72");
    }

    #[test]
    fn test_consumption_winter_city_day() {
        // 200 km in January: 200 * 0.102 = 20.40
        let norms = NormTable::default();
        let split = split_distance(200, INTERCITY_ROUND_TRIP_KM);
        let spent = consumption(&split, norms.for_season(Season::of_month(1)));
        assert_eq!(spent.to_string(), "20.40");
    }

    #[test]
    fn test_consumption_rounds_half_up() {
        // 5 km in the city in summer: 5 * 0.093 = 0.465 -> 0.47
        let norms = NormTable::default();
        let split = split_distance(5, INTERCITY_ROUND_TRIP_KM);
        let spent = consumption(&split, norms.for_season(Season::Summer));
        assert_eq!(spent.to_string(), "0.47");
    }

    #[test]
    fn test_remaining() {
        let fuel_begin = Volume::from_str("50.00").unwrap();
        let spent = Volume::from_str("35.72").unwrap();
        let fuel_added = Volume::from_str("20").unwrap();
        assert_eq!(
            remaining(fuel_begin, spent, fuel_added).value(),
            rust_decimal::Decimal::from_str("34.28").unwrap()
        );
    }

    #[test]
    fn test_remaining_can_go_negative() {
        let fuel_begin = Volume::from_str("10").unwrap();
        let spent = Volume::from_str("35.72").unwrap();
        let fuel_added = Volume::default();
        assert_eq!(
            remaining(fuel_begin, spent, fuel_added).to_string(),
            "-25.72"
        );
    }
}
