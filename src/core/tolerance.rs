//! General tolerance classes for linear dimensions
//!
//! Each class is a fixed table of length bands. A band is open on the left
//! and closed on the right, except the first `[0.5, 3]` band of the fine,
//! medium and coarse classes which is closed on both ends. Lengths outside
//! every band of a class are unclassifiable and yield `NaN` from
//! [`classify`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Precision grade used to look up a permissible deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToleranceClass {
    Fine,
    #[default]
    Medium,
    Coarse,
    VeryCoarse,
}

/// One length range of a tolerance class and its deviation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceBand {
    /// Lower end of the range
    pub low: f64,
    /// Upper end of the range (always inclusive)
    pub high: f64,
    /// Whether `low` itself belongs to the band
    pub low_inclusive: bool,
    /// Permissible deviation (applied as +/-)
    pub tolerance: f64,
}

impl ToleranceBand {
    const fn closed(low: f64, high: f64, tolerance: f64) -> Self {
        Self {
            low,
            high,
            low_inclusive: true,
            tolerance,
        }
    }

    const fn open_closed(low: f64, high: f64, tolerance: f64) -> Self {
        Self {
            low,
            high,
            low_inclusive: false,
            tolerance,
        }
    }

    /// Check whether a nominal length falls inside this band
    pub fn contains(&self, length: f64) -> bool {
        let above_low = if self.low_inclusive {
            length >= self.low
        } else {
            length > self.low
        };
        above_low && length <= self.high
    }
}

impl fmt::Display for ToleranceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.low_inclusive { '[' } else { '(' };
        write!(f, "{}{}, {}]", open, self.low, self.high)
    }
}

const FINE: &[ToleranceBand] = &[
    ToleranceBand::closed(0.5, 3.0, 0.05),
    ToleranceBand::open_closed(3.0, 6.0, 0.05),
    ToleranceBand::open_closed(6.0, 30.0, 0.1),
    ToleranceBand::open_closed(30.0, 120.0, 0.15),
    ToleranceBand::open_closed(120.0, 400.0, 0.2),
    ToleranceBand::open_closed(400.0, 1000.0, 0.3),
    ToleranceBand::open_closed(1000.0, 2000.0, 0.5),
];

const MEDIUM: &[ToleranceBand] = &[
    ToleranceBand::closed(0.5, 3.0, 0.1),
    ToleranceBand::open_closed(3.0, 6.0, 0.1),
    ToleranceBand::open_closed(6.0, 30.0, 0.2),
    ToleranceBand::open_closed(30.0, 120.0, 0.3),
    ToleranceBand::open_closed(120.0, 400.0, 0.5),
    ToleranceBand::open_closed(400.0, 1000.0, 0.8),
    ToleranceBand::open_closed(1000.0, 2000.0, 1.2),
    ToleranceBand::open_closed(2000.0, 4000.0, 2.0),
];

const COARSE: &[ToleranceBand] = &[
    ToleranceBand::closed(0.5, 3.0, 0.2),
    ToleranceBand::open_closed(3.0, 6.0, 0.3),
    ToleranceBand::open_closed(6.0, 30.0, 0.5),
    ToleranceBand::open_closed(30.0, 120.0, 0.8),
    ToleranceBand::open_closed(120.0, 400.0, 1.2),
    ToleranceBand::open_closed(400.0, 1000.0, 2.0),
    ToleranceBand::open_closed(1000.0, 2000.0, 3.0),
    ToleranceBand::open_closed(2000.0, 4000.0, 4.0),
];

// Very coarse has no deviation defined below 3
const VERY_COARSE: &[ToleranceBand] = &[
    ToleranceBand::open_closed(3.0, 6.0, 0.5),
    ToleranceBand::open_closed(6.0, 30.0, 1.0),
    ToleranceBand::open_closed(30.0, 120.0, 1.5),
    ToleranceBand::open_closed(120.0, 400.0, 2.5),
    ToleranceBand::open_closed(400.0, 1000.0, 4.0),
    ToleranceBand::open_closed(1000.0, 2000.0, 5.0),
    ToleranceBand::open_closed(2000.0, 4000.0, 8.0),
];

impl ToleranceClass {
    /// Get all classes, finest first
    pub fn all() -> &'static [ToleranceClass] {
        &[
            ToleranceClass::Fine,
            ToleranceClass::Medium,
            ToleranceClass::Coarse,
            ToleranceClass::VeryCoarse,
        ]
    }

    /// Single-letter class designation (f, m, c, v)
    pub fn code(&self) -> char {
        match self {
            ToleranceClass::Fine => 'f',
            ToleranceClass::Medium => 'm',
            ToleranceClass::Coarse => 'c',
            ToleranceClass::VeryCoarse => 'v',
        }
    }

    /// The ordered band table of this class
    pub fn bands(&self) -> &'static [ToleranceBand] {
        match self {
            ToleranceClass::Fine => FINE,
            ToleranceClass::Medium => MEDIUM,
            ToleranceClass::Coarse => COARSE,
            ToleranceClass::VeryCoarse => VERY_COARSE,
        }
    }

    /// Find the band a nominal length falls into
    pub fn band(&self, length: f64) -> Option<&'static ToleranceBand> {
        self.bands().iter().find(|band| band.contains(length))
    }

    /// Permissible deviation for a nominal length, if the length is classifiable
    pub fn tolerance(&self, length: f64) -> Option<f64> {
        self.band(length).map(|band| band.tolerance)
    }
}

impl fmt::Display for ToleranceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToleranceClass::Fine => write!(f, "fine"),
            ToleranceClass::Medium => write!(f, "medium"),
            ToleranceClass::Coarse => write!(f, "coarse"),
            ToleranceClass::VeryCoarse => write!(f, "very-coarse"),
        }
    }
}

impl FromStr for ToleranceClass {
    type Err = UnknownToleranceClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f" | "fine" => Ok(ToleranceClass::Fine),
            "m" | "medium" => Ok(ToleranceClass::Medium),
            "c" | "coarse" => Ok(ToleranceClass::Coarse),
            "v" | "very-coarse" | "very_coarse" | "verycoarse" => Ok(ToleranceClass::VeryCoarse),
            _ => Err(UnknownToleranceClass(s.to_string())),
        }
    }
}

// Files accept the same spellings as the command line
impl<'de> Deserialize<'de> for ToleranceClass {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Returned when a tolerance class name is not recognized
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tolerance class: '{0}' (valid: fine, medium, coarse, very-coarse)")]
pub struct UnknownToleranceClass(pub String);

/// Permissible deviation for `nominal_length` in `class`
///
/// Total over all inputs: lengths outside every band of the class
/// (including negative, zero, NaN and values above the last band) yield
/// `f64::NAN` rather than an error.
pub fn classify(nominal_length: f64, class: ToleranceClass) -> f64 {
    class.tolerance(nominal_length).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medium_lower_boundary_selects_first_band() {
        let band = ToleranceClass::Medium.band(3.0).unwrap();
        assert!(band.low_inclusive);
        assert_eq!((band.low, band.high), (0.5, 3.0));
        assert_eq!(classify(3.0, ToleranceClass::Medium), 0.1);
    }

    #[test]
    fn test_medium_six_selects_second_band() {
        let band = ToleranceClass::Medium.band(6.0).unwrap();
        assert!(!band.low_inclusive);
        assert_eq!((band.low, band.high), (3.0, 6.0));
        assert_eq!(classify(6.0, ToleranceClass::Medium), 0.1);
    }

    #[test]
    fn test_just_above_boundary_moves_to_next_band() {
        let band = ToleranceClass::Medium.band(3.0001).unwrap();
        assert_eq!((band.low, band.high), (3.0, 6.0));
        assert_eq!(classify(30.0001, ToleranceClass::Medium), 0.3);
        assert_eq!(classify(30.0, ToleranceClass::Medium), 0.2);
    }

    #[test]
    fn test_upper_bounds_are_inclusive() {
        assert_eq!(classify(2000.0, ToleranceClass::Fine), 0.5);
        assert_eq!(classify(4000.0, ToleranceClass::Coarse), 4.0);
        assert_eq!(classify(4000.0, ToleranceClass::VeryCoarse), 8.0);
        assert_eq!(classify(120.0, ToleranceClass::Coarse), 0.8);
    }

    #[test]
    fn test_lower_floor_is_inclusive() {
        assert_eq!(classify(0.5, ToleranceClass::Fine), 0.05);
        assert_eq!(classify(0.5, ToleranceClass::Coarse), 0.2);
    }

    #[test]
    fn test_out_of_range_is_nan() {
        assert!(classify(4000.0001, ToleranceClass::Coarse).is_nan());
        assert!(classify(0.1, ToleranceClass::Fine).is_nan());
        assert!(classify(0.4999, ToleranceClass::Medium).is_nan());
        assert!(classify(2000.5, ToleranceClass::Fine).is_nan());
        assert!(classify(-10.0, ToleranceClass::Medium).is_nan());
        assert!(classify(0.0, ToleranceClass::VeryCoarse).is_nan());
    }

    #[test]
    fn test_very_coarse_has_no_first_band() {
        assert!(classify(3.0, ToleranceClass::VeryCoarse).is_nan());
        assert!(classify(1.0, ToleranceClass::VeryCoarse).is_nan());
        assert_eq!(classify(3.5, ToleranceClass::VeryCoarse), 0.5);
    }

    #[test]
    fn test_non_finite_inputs_are_nan() {
        for class in ToleranceClass::all() {
            assert!(classify(f64::NAN, *class).is_nan());
            assert!(classify(f64::INFINITY, *class).is_nan());
            assert!(classify(f64::NEG_INFINITY, *class).is_nan());
        }
    }

    #[test]
    fn test_bands_do_not_overlap() {
        for class in ToleranceClass::all() {
            for pair in class.bands().windows(2) {
                assert_eq!(pair[0].high, pair[1].low, "{} bands are not contiguous", class);
                assert!(!pair[1].low_inclusive);
            }
        }
    }

    #[test]
    fn test_nan_exactly_outside_every_band() {
        let probes = [
            -1.0, 0.0, 0.25, 0.5, 1.0, 3.0, 4.5, 6.0, 10.0, 30.0, 100.0, 120.0, 300.0, 400.0,
            999.0, 1000.0, 1500.0, 2000.0, 3000.0, 4000.0, 5000.0,
        ];
        for class in ToleranceClass::all() {
            for length in probes {
                let in_band = class.bands().iter().any(|b| b.contains(length));
                assert_eq!(
                    classify(length, *class).is_nan(),
                    !in_band,
                    "class {} length {}",
                    class,
                    length
                );
            }
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        for class in ToleranceClass::all() {
            assert_eq!(
                classify(250.0, *class).to_bits(),
                classify(250.0, *class).to_bits()
            );
        }
    }

    #[test]
    fn test_class_parsing() {
        assert_eq!("m".parse::<ToleranceClass>().unwrap(), ToleranceClass::Medium);
        assert_eq!("Fine".parse::<ToleranceClass>().unwrap(), ToleranceClass::Fine);
        assert_eq!(
            "very_coarse".parse::<ToleranceClass>().unwrap(),
            ToleranceClass::VeryCoarse
        );
        assert_eq!("v".parse::<ToleranceClass>().unwrap(), ToleranceClass::VeryCoarse);
        assert!("extra-fine".parse::<ToleranceClass>().is_err());
    }

    #[test]
    fn test_class_display_roundtrips() {
        for class in ToleranceClass::all() {
            assert_eq!(class.to_string().parse::<ToleranceClass>().unwrap(), *class);
        }
    }

    #[test]
    fn test_band_display() {
        assert_eq!(ToleranceClass::Fine.bands()[0].to_string(), "[0.5, 3]");
        assert_eq!(ToleranceClass::Fine.bands()[1].to_string(), "(3, 6]");
    }
}
