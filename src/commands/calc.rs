use crate::args::CalcArgs;
use crate::commands::Out;
use crate::model::calc::{consumption, remaining, split_distance};
use crate::model::norms::Season;
use crate::model::Volume;
use crate::{Config, Result};
use serde::Serialize;

/// The result of a one-off fuel balance calculation.
#[derive(Debug, Clone, Serialize)]
pub struct FuelEstimate {
    distance_total: u32,
    distance_inside_city: u32,
    distance_outside_city: u32,
    season: Season,
    fuel_spent: Volume,
    fuel_end: Volume,
}

/// Runs the fuel balance calculation for a single day without recording
/// anything. Uses the configured norms and threshold.
pub fn calc(config: &Config, args: &CalcArgs) -> Result<Out<FuelEstimate>> {
    let split = split_distance(args.distance(), config.intercity_threshold_km());
    let season = Season::of_month(args.month());
    let fuel_spent = consumption(&split, config.norms().for_season(season));
    let fuel_end = remaining(args.fuel_begin(), fuel_spent, args.fuel_added());

    let estimate = FuelEstimate {
        distance_total: split.total(),
        distance_inside_city: split.inside_city(),
        distance_outside_city: split.outside_city(),
        season,
        fuel_spent,
        fuel_end,
    };
    let message = format!(
        "{} km ({} city, {} intercity), season {}: fuel spent {}, fuel remaining {}",
        estimate.distance_total,
        estimate.distance_inside_city,
        estimate.distance_outside_city,
        estimate.season,
        estimate.fuel_spent,
        estimate.fuel_end
    );
    Ok(Out::new(message, estimate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("home")).unwrap();
        (dir, config)
    }

    #[test]
    fn test_calc_summer_long_day() {
        let (_dir, config) = config();
        let args = CalcArgs::new(400, 6, "50".parse().unwrap(), Volume::default());
        let out = calc(&config, &args).unwrap();
        let estimate = out.structure().unwrap();
        assert_eq!(estimate.fuel_spent.to_string(), "35.72");
        assert_eq!(estimate.fuel_end.to_string(), "14.28");
        assert!(out.message().contains("370 intercity"));
    }

    #[test]
    fn test_calc_winter_city_day() {
        let (_dir, config) = config();
        let args = CalcArgs::new(200, 1, "30".parse().unwrap(), "10".parse().unwrap());
        let out = calc(&config, &args).unwrap();
        let estimate = out.structure().unwrap();
        assert_eq!(estimate.season, Season::Winter);
        assert_eq!(estimate.fuel_spent.to_string(), "20.40");
        assert_eq!(estimate.fuel_end.to_string(), "19.60");
    }
}
