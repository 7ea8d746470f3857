//! Length values with a unit suffix (`"120px"`, `"8rem"`, `"40"`).
//!
//! Column widths travel through the model as the host wrote them. Arithmetic
//! happens on the numeric magnitude; results are written back with a unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LengthError;

/// Unit used when no length in play names one.
pub const DEFAULT_UNIT: &str = "px";

/// A length as supplied by the host, e.g. `"120px"`.
///
/// The raw text is preserved. A length whose text has no leading number is
/// still representable; [`Length::magnitude`] returns `None` for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LengthRepr", into = "String")]
pub struct Length(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f64),
    Text(String),
}

impl From<LengthRepr> for Length {
    fn from(repr: LengthRepr) -> Self {
        match repr {
            LengthRepr::Number(n) => Length::px(n),
            LengthRepr::Text(s) => Length(s),
        }
    }
}

impl From<Length> for String {
    fn from(length: Length) -> Self {
        length.0
    }
}

impl Length {
    /// Wrap raw text without validating it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// A pixel length.
    pub fn px(value: f64) -> Self {
        Self::with_unit(value, DEFAULT_UNIT)
    }

    /// A length with an explicit unit.
    pub fn with_unit(value: f64, unit: &str) -> Self {
        Self(format!("{}{}", value, unit))
    }

    /// Parse and validate a length.
    pub fn parse(raw: &str) -> Result<Self, LengthError> {
        raw.parse()
    }

    /// The text as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric magnitude with the unit suffix stripped.
    pub fn magnitude(&self) -> Option<f64> {
        let (number, _) = split_number(&self.0);
        number.parse::<f64>().ok()
    }

    /// The unit suffix, or `""` when there is none or the length is not numeric.
    pub fn unit(&self) -> &str {
        let (number, unit) = split_number(&self.0);
        if number.parse::<f64>().is_err() {
            return "";
        }
        unit.trim()
    }

    /// Magnitude usable as a clamp bound.
    ///
    /// Zero and non-numeric lengths configure nothing.
    pub fn bound(&self) -> Option<f64> {
        self.magnitude().filter(|v| *v > 0.0)
    }
}

impl FromStr for Length {
    type Err = LengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(LengthError::Empty);
        }
        let length = Length::new(s.trim());
        if length.magnitude().is_none() {
            return Err(LengthError::NotNumeric(s.to_string()));
        }
        Ok(length)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split `"12.5px"` into `("12.5", "px")`.
fn split_number(raw: &str) -> (&str, &str) {
    let raw = raw.trim_start();
    let mut seen_dot = false;
    let end = raw
        .char_indices()
        .find(|&(i, c)| {
            if c == '-' && i == 0 {
                return false;
            }
            if c == '.' && !seen_dot {
                seen_dot = true;
                return false;
            }
            !c.is_ascii_digit()
        })
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw.split_at(end)
}

/// Pick the unit to write a resolved width with.
///
/// The first of `candidates` that names a unit wins, else [`DEFAULT_UNIT`].
pub fn resolve_unit<'a>(candidates: &[Option<&'a Length>]) -> &'a str {
    candidates
        .iter()
        .flatten()
        .copied()
        .map(|length| length.unit())
        .find(|unit| !unit.is_empty())
        .unwrap_or(DEFAULT_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_and_unit() {
        let length = Length::new("120px");
        assert_eq!(length.magnitude(), Some(120.0));
        assert_eq!(length.unit(), "px");

        let length = Length::new("12.5rem");
        assert_eq!(length.magnitude(), Some(12.5));
        assert_eq!(length.unit(), "rem");
    }

    #[test]
    fn test_unitless() {
        let length = Length::new("40");
        assert_eq!(length.magnitude(), Some(40.0));
        assert_eq!(length.unit(), "");
    }

    #[test]
    fn test_non_numeric() {
        let length = Length::new("auto");
        assert_eq!(length.magnitude(), None);
        assert_eq!(length.unit(), "");
        assert_eq!(length.bound(), None);
    }

    #[test]
    fn test_zero_is_not_a_bound() {
        assert_eq!(Length::new("0px").bound(), None);
        assert_eq!(Length::new("50px").bound(), Some(50.0));
    }

    #[test]
    fn test_px_formats_without_fraction() {
        assert_eq!(Length::px(50.0).as_str(), "50px");
        assert_eq!(Length::with_unit(7.5, "em").as_str(), "7.5em");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Length::parse("  "), Err(LengthError::Empty));
        assert!(matches!(Length::parse("wide"), Err(LengthError::NotNumeric(_))));
        assert_eq!(Length::parse("30px").unwrap().magnitude(), Some(30.0));
    }

    #[test]
    fn test_resolve_unit() {
        let rem = Length::new("3rem");
        let bare = Length::new("40");
        assert_eq!(resolve_unit(&[None, Some(&rem)]), "rem");
        assert_eq!(resolve_unit(&[Some(&bare), Some(&rem)]), "rem");
        assert_eq!(resolve_unit(&[None, None]), "px");
    }

    #[test]
    fn test_deserialize_number_as_px() {
        let lengths: Vec<Length> = serde_json::from_str(r#"[80, "6em"]"#).unwrap();
        assert_eq!(lengths[0].as_str(), "80px");
        assert_eq!(lengths[1].as_str(), "6em");
    }
}
