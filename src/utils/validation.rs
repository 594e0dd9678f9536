//! Validation helpers
//!
//! Helpers for validating and normalizing request fields before they
//! reach the repositories.

use chrono::{DateTime, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::ValidationError;

/// Length of a modern VIN
pub const VIN_LENGTH: usize = 17;

lazy_static! {
    // I, O and Q are never used in a VIN
    static ref VIN_REGEX: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
}

/// Trim and upper-case a VIN as typed by an admin
pub fn normalize_vin(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validate an already normalized VIN
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    if !VIN_REGEX.is_match(value) {
        let mut error = ValidationError::new("vin");
        error.add_param("value".into(), &value.to_string());
        error.message = Some(format!("VIN must be {} characters (A-Z, 0-9, excluding I, O, Q)", VIN_LENGTH).into());
        return Err(error);
    }
    Ok(())
}

/// Parse an RFC 3339 timestamp or an HTML `datetime-local` value (read as UTC)
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    let mut error = ValidationError::new("datetime");
    error.add_param("value".into(), &value.to_string());
    error.add_param("format".into(), &"RFC3339 or YYYY-MM-DDTHH:MM".to_string());
    Err(error)
}

/// Deserialize an optional enum through its `FromStr`, so `active` and
/// `ACTIVE` both parse. A blank value counts as absent.
pub fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| raw.parse::<T>().map_err(de::Error::custom))
        .transpose()
}

/// Collapse blank strings to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Validate that a value is not negative
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: &T,
) -> Result<(), ValidationError> {
    if *value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}

/// Validate that a value is strictly positive
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: &T,
) -> Result<(), ValidationError> {
    if *value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}
