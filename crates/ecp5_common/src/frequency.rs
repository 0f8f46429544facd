//! Clock frequencies that remember the literal they were written as.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A clock frequency in Hertz.
///
/// Constraint files repeat the frequency exactly as the user wrote it, so the
/// parsed value keeps its source literal next to the numeric value. Only
/// plain integer or decimal literals in Hz are accepted (`"25000000"`,
/// `"12.5e6"` is rejected, `"48000.5"` is fine); there is no unit conversion.
#[derive(Clone, PartialEq)]
pub struct Frequency {
    hz: f64,
    literal: String,
}

impl Frequency {
    /// Creates a frequency from an integer number of Hertz.
    pub fn from_hz(hz: u64) -> Self {
        Self {
            hz: hz as f64,
            literal: hz.to_string(),
        }
    }

    /// Returns the frequency in Hertz.
    pub fn hz(&self) -> f64 {
        self.hz
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(&self) -> f64 {
        self.hz / 1_000_000.0
    }

    /// Returns the literal text this frequency was parsed from.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.literal)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Error type for parsing frequency literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseFrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid frequency '{}': expected an integer or decimal number of Hz",
            self.input
        )
    }
}

impl std::error::Error for ParseFrequencyError {}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let (int_part, frac_part) = match s.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (s, None),
        };
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || frac_part.is_some_and(|frac| !all_digits(frac)) {
            return Err(err());
        }

        let hz: f64 = s.parse().map_err(|_| err())?;
        if hz <= 0.0 {
            return Err(err());
        }
        Ok(Frequency {
            hz,
            literal: s.to_string(),
        })
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.literal)
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FrequencyVisitor;

        impl Visitor<'_> for FrequencyVisitor {
            type Value = Frequency;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a frequency in Hz as a number or numeric string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                if v == 0 {
                    return Err(E::custom("frequency must be positive"));
                }
                Ok(Frequency::from_hz(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                let v = u64::try_from(v).map_err(|_| E::custom("frequency must be positive"))?;
                self.visit_u64(v)
            }

            // `Debug` keeps the fractional part of whole floats (`25000000.0`),
            // which `Display` drops.
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                self.visit_str(&format!("{v:?}"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(FrequencyVisitor)
    }
}
