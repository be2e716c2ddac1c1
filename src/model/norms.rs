//! Seasonal fuel consumption norms.
//!
//! Consumption rates are given per kilometre, split by season and by whether
//! the kilometre was driven inside or outside the city. The defaults
//! reproduce the operator's approved rate sheet; `config.json` can override
//! them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default distance, in kilometres, attributed to the intercity portion of a
/// day once the day's total reaches it: the round trip of the regular
/// intercity route.
pub const INTERCITY_ROUND_TRIP_KM: u32 = 370;

/// The season a calendar month falls into for norm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Summer,
    Winter,
}

serde_plain::derive_display_from_serialize!(Season);
serde_plain::derive_fromstr_from_deserialize!(Season);

impl Season {
    /// Classifies a calendar month (1-12). April through October count as
    /// summer, the rest as winter.
    pub fn of_month(month: u32) -> Self {
        if (4..=10).contains(&month) {
            Season::Summer
        } else {
            Season::Winter
        }
    }
}

/// Per-kilometre consumption rates for one season, in litres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeasonNorm {
    /// Litres per kilometre driven inside the city.
    inside_city: Decimal,
    /// Litres per kilometre driven outside the city.
    outside_city: Decimal,
}

impl SeasonNorm {
    pub fn new(inside_city: Decimal, outside_city: Decimal) -> Self {
        Self {
            inside_city,
            outside_city,
        }
    }

    pub fn inside_city(&self) -> Decimal {
        self.inside_city
    }

    pub fn outside_city(&self) -> Decimal {
        self.outside_city
    }
}

/// Both seasons' consumption rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NormTable {
    summer: SeasonNorm,
    winter: SeasonNorm,
}

impl Default for NormTable {
    fn default() -> Self {
        Self {
            summer: SeasonNorm::new(Decimal::new(93, 3), Decimal::new(89, 3)),
            winter: SeasonNorm::new(Decimal::new(102, 3), Decimal::new(98, 3)),
        }
    }
}

impl NormTable {
    pub fn new(summer: SeasonNorm, winter: SeasonNorm) -> Self {
        Self { summer, winter }
    }

    pub fn for_season(&self, season: Season) -> &SeasonNorm {
        match season {
            Season::Summer => &self.summer,
            Season::Winter => &self.winter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_season_of_month() {
        for month in 4..=10 {
            assert_eq!(Season::of_month(month), Season::Summer, "month {month}");
        }
        for month in [1, 2, 3, 11, 12] {
            assert_eq!(Season::of_month(month), Season::Winter, "month {month}");
        }
    }

    #[test]
    fn test_season_display_and_from_str() {
        assert_eq!(Season::Summer.to_string(), "summer");
        assert_eq!(Season::from_str("winter").unwrap(), Season::Winter);
        assert!(Season::from_str("spring").is_err());
    }

    #[test]
    fn test_default_rates() {
        let norms = NormTable::default();
        let summer = norms.for_season(Season::Summer);
        assert_eq!(summer.inside_city(), Decimal::from_str("0.093").unwrap());
        assert_eq!(summer.outside_city(), Decimal::from_str("0.089").unwrap());
        let winter = norms.for_season(Season::Winter);
        assert_eq!(winter.inside_city(), Decimal::from_str("0.102").unwrap());
        assert_eq!(winter.outside_city(), Decimal::from_str("0.098").unwrap());
    }

    #[test]
    fn test_norm_table_serde_round_trip() {
        let original = NormTable::default();
        let json = serde_json::to_string(&original).unwrap();
        let read: NormTable = serde_json::from_str(&json).unwrap();
        assert_eq!(original, read);
    }
}
