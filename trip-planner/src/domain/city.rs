//! City name types.

use std::fmt;

/// Error returned when parsing an invalid city name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid city name: {reason}")]
pub struct InvalidCityName {
    reason: &'static str,
}

/// A validated city name.
///
/// City names are single whitespace-free tokens, which is what lets plan
/// files stay whitespace-delimited. This type guarantees that any
/// `CityName` value is valid by construction.
///
/// # Examples
///
/// ```
/// use trip_planner::domain::CityName;
///
/// let london = CityName::parse("London").unwrap();
/// assert_eq!(london.as_str(), "London");
///
/// // Empty names are rejected
/// assert!(CityName::parse("").is_err());
///
/// // Embedded whitespace is rejected
/// assert!(CityName::parse("New York").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CityName(String);

impl CityName {
    /// Parse a city name from a string.
    ///
    /// The input must be non-empty and contain no whitespace or control
    /// characters.
    pub fn parse(s: &str) -> Result<Self, InvalidCityName> {
        if s.is_empty() {
            return Err(InvalidCityName {
                reason: "must not be empty",
            });
        }

        for c in s.chars() {
            if c.is_whitespace() {
                return Err(InvalidCityName {
                    reason: "must not contain whitespace",
                });
            }
            if c.is_control() {
                return Err(InvalidCityName {
                    reason: "must not contain control characters",
                });
            }
        }

        Ok(CityName(s.to_owned()))
    }

    /// Returns the city name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CityName({})", self.0)
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
