//! Year key validation

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Earliest year served
pub const MIN_YEAR: i32 = 1980;

/// A validated calendar year in `[MIN_YEAR, current year]`
///
/// The only lookup key of the service. Constructed exclusively through
/// [`YearKey::parse`], so holding one means no further range checks are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct YearKey(i32);

/// Rejected year input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid year '{0}'. Must be a positive integer.")]
    NotNumeric(String),

    #[error("Invalid year '{value}'. Must be between {min} and {max}.", min = MIN_YEAR)]
    OutOfRange { value: String, max: i32 },
}

impl YearKey {
    /// Parse a path segment against the current UTC year
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::parse_with_current_year(raw, nostalgia_common::time::current_year())
    }

    /// Parse with an explicit upper bound
    ///
    /// Only ASCII digit strings are accepted: no sign, no whitespace.
    pub fn parse_with_current_year(raw: &str, current_year: i32) -> Result<Self, ValidationError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotNumeric(raw.to_string()));
        }

        raw.parse::<i32>()
            .ok()
            .filter(|year| (MIN_YEAR..=current_year).contains(year))
            .map(YearKey)
            .ok_or_else(|| ValidationError::OutOfRange {
                value: raw.to_string(),
                max: current_year,
            })
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_range_bounds() {
        assert_eq!(YearKey::parse_with_current_year("1980", 2024).unwrap().value(), 1980);
        assert_eq!(YearKey::parse_with_current_year("2024", 2024).unwrap().value(), 2024);
    }

    #[test]
    fn test_rejects_outside_range() {
        assert!(matches!(
            YearKey::parse_with_current_year("1979", 2024),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            YearKey::parse_with_current_year("2050", 2024),
            Err(ValidationError::OutOfRange { max: 2024, .. })
        ));
    }

    #[test]
    fn test_rejects_non_numeric() {
        for raw in ["abc", "", "-1999", "+1999", " 1999", "1999.0", "19a9"] {
            assert_eq!(
                YearKey::parse_with_current_year(raw, 2024),
                Err(ValidationError::NotNumeric(raw.to_string())),
                "{raw:?} should be rejected as non-numeric"
            );
        }
    }

    #[test]
    fn test_overflowing_digits_are_out_of_range() {
        assert!(matches!(
            YearKey::parse_with_current_year("99999999999999999999", 2024),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_uses_current_year() {
        let this_year = nostalgia_common::time::current_year();
        assert!(YearKey::parse(&this_year.to_string()).is_ok());
        assert!(YearKey::parse(&(this_year + 1).to_string()).is_err());
    }

    #[test]
    fn test_display_is_plain_year() {
        let year = YearKey::parse_with_current_year("2005", 2024).unwrap();
        assert_eq!(year.to_string(), "2005");
        assert_eq!(serde_json::to_string(&year).unwrap(), "2005");
    }
}
