//! Volume type for handling litre amounts with either decimal separator.
//!
//! This module provides the `Volume` type which wraps `Decimal` and handles
//! parsing values that may be written with a decimal point or, as on paper
//! waybills, a decimal comma.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents how litre amounts were (or should be) formatted.
///
/// # Examples
///  - `VolumeFormat{ comma: false }` -> `35.72`
///  - `VolumeFormat{ comma: true }` -> `35,72`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolumeFormat {
    /// Whether a comma is used as the decimal separator.
    comma: bool,
}

impl Default for VolumeFormat {
    fn default() -> Self {
        DEFAULT_FORMAT
    }
}

/// The default format uses a decimal point: e.g. `35.72`.
const DEFAULT_FORMAT: VolumeFormat = VolumeFormat { comma: false };

/// Represents a litre amount.
///
/// This type wraps `Decimal` and provides custom serialization/deserialization
/// to handle amounts that may be written with a decimal point or a decimal
/// comma.
///
/// Formatting is considered significant for the purposes of equality, so for
/// numeric comparisons, you should access the `Decimal` value and use that.
///
/// # Examples
///
/// Parsing with a decimal point:
/// ```
/// # use waybill_ledger::model::Volume;
/// # use std::str::FromStr;
/// let volume = Volume::from_str("35.72").unwrap();
/// assert_eq!(volume.to_string(), "35.72");
/// ```
///
/// Parsing with a decimal comma:
/// ```
/// # use waybill_ledger::model::Volume;
/// # use std::str::FromStr;
/// let volume = Volume::from_str("35,72").unwrap();
/// assert_ne!(volume.to_string(), "35.72");
/// assert_eq!(volume.to_string(), "35,72");
/// ```
///
/// Value equivalency, but not absolute equivalency
/// ```
/// # use waybill_ledger::model::Volume;
/// # use std::str::FromStr;
/// let a = Volume::from_str("20.40").unwrap();
/// let b = Volume::from_str("20,40").unwrap();
/// assert_ne!(a, b);
/// assert_ne!(a.to_string(), b.to_string());
/// assert_eq!(a.value(), b.value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Volume {
    /// The parsed numerical value.
    value: Decimal,
    /// The way the numerical value was parsed from, or should be written to, a `String`.
    format: VolumeFormat,
}

impl Volume {
    /// Creates a new Volume from a Decimal value with default `String` formatting.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: DEFAULT_FORMAT,
        }
    }

    /// Creates a new Volume from a Decimal value with the specified formatting.
    pub const fn new_with_format(value: Decimal, format: VolumeFormat) -> Self {
        Self { value, format }
    }

    /// Quantizes a Decimal to two fractional digits, rounding half-up, and
    /// wraps it. Every derived fuel figure goes through this.
    pub fn rounded(value: Decimal) -> Self {
        Self::new(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the volume is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the volume is negative.
    pub fn is_negative(&self) -> bool {
        self.value().is_sign_negative() && !self.is_zero()
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct VolumeError(rust_decimal::Error);

impl Debug for VolumeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for VolumeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for VolumeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Volume {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Remove whitespace
        let trimmed = s.trim();

        // Handle empty string
        if trimmed.is_empty() {
            return Ok(Volume::default());
        }

        // Normalize a decimal comma to a decimal point. A string with both
        // separators falls through to the Decimal parser and fails there.
        let comma = trimmed.contains(',');
        let normalized = if comma {
            trimmed.replace(',', ".")
        } else {
            trimmed.to_string()
        };

        // Parse the decimal value
        let value = Decimal::from_str(&normalized).map_err(VolumeError)?;
        Ok(Volume {
            value,
            format: VolumeFormat { comma },
        })
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.format.comma {
            write!(f, "{}", self.value.to_string().replace('.', ","))
        } else {
            write!(f, "{}", self.value)
        }
    }
}

impl Serialize for Volume {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a string in the as-written format
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Volume {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Volume::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Volume {
    fn from(value: Decimal) -> Self {
        Volume::new(value)
    }
}

impl From<Volume> for Decimal {
    fn from(volume: Volume) -> Self {
        volume.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_point() {
        let volume = Volume::from_str("35.72").unwrap();
        assert_eq!(volume.value(), Decimal::from_str("35.72").unwrap());
    }

    #[test]
    fn test_parse_with_comma() {
        let volume = Volume::from_str("35,72").unwrap();
        assert_eq!(volume.value(), Decimal::from_str("35.72").unwrap());
    }

    #[test]
    fn test_parse_whole_number() {
        let volume = Volume::from_str("250").unwrap();
        assert_eq!(volume.value(), Decimal::from_str("250").unwrap());
    }

    #[test]
    fn test_parse_negative() {
        let volume = Volume::from_str("-3.50").unwrap();
        assert_eq!(volume.value(), Decimal::from_str("-3.50").unwrap());
    }

    #[test]
    fn test_parse_empty_string() {
        let volume = Volume::from_str("").unwrap();
        assert_eq!(volume.value(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_whitespace() {
        let volume = Volume::from_str("  35,72  ").unwrap();
        assert_eq!(volume.value(), Decimal::from_str("35.72").unwrap());
    }

    #[test]
    fn test_parse_both_separators_fails() {
        assert!(Volume::from_str("1,000.00").is_err());
    }

    #[test]
    fn test_display_retains_comma() {
        let volume = Volume::from_str("20,40").unwrap();
        assert_eq!(volume.to_string(), "20,40");
    }

    #[test]
    fn test_display_retains_point() {
        let volume = Volume::from_str("20.40").unwrap();
        assert_eq!(volume.to_string(), "20.40");
    }

    #[test]
    fn test_rounded_half_up() {
        let volume = Volume::rounded(Decimal::from_str("35.715").unwrap());
        assert_eq!(volume.to_string(), "35.72");
    }

    #[test]
    fn test_rounded_half_up_negative() {
        // Half-up rounds away from zero on the negative side too
        let volume = Volume::rounded(Decimal::from_str("-0.005").unwrap());
        assert_eq!(volume.to_string(), "-0.01");
    }

    #[test]
    fn test_rounded_no_op() {
        let volume = Volume::rounded(Decimal::from_str("20.4").unwrap());
        assert_eq!(volume.value(), Decimal::from_str("20.4").unwrap());
    }

    #[test]
    fn test_serialize() {
        let volume = Volume::from_str("35,72").unwrap();
        let json = serde_json::to_string(&volume).unwrap();
        assert_eq!(json, "\"35,72\"");
    }

    #[test]
    fn test_deserialize_with_comma() {
        let json = "\"35,72\"";
        let volume: Volume = serde_json::from_str(json).unwrap();
        assert_eq!(volume.value(), Decimal::from_str("35.72").unwrap());
    }

    #[test]
    fn test_deserialize_with_point() {
        let json = "\"35.72\"";
        let volume: Volume = serde_json::from_str(json).unwrap();
        assert_eq!(volume.value(), Decimal::from_str("35.72").unwrap());
    }

    #[test]
    fn test_serde_round_trip() {
        let original = Volume::from_str("47,30").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let read: Volume = serde_json::from_str(&json).unwrap();
        assert_eq!(original, read);
    }

    #[test]
    fn test_equality() {
        let a = Volume::from_str("20.40").unwrap();
        let b = Volume::from_str("20,40").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.value(), b.value());
    }

    #[test]
    fn test_is_zero() {
        let zero = Volume::from_str("0.00").unwrap();
        assert!(zero.is_zero());

        let non_zero = Volume::from_str("50.00").unwrap();
        assert!(!non_zero.is_zero());
    }

    #[test]
    fn test_is_negative() {
        let negative = Volume::from_str("-0.50").unwrap();
        assert!(negative.is_negative());

        let positive = Volume::from_str("50.00").unwrap();
        assert!(!positive.is_negative());

        let zero = Volume::from_str("0").unwrap();
        assert!(!zero.is_negative());
    }
}
