//! Canonical day identity.
//!
//! A [`DateKey`] is the `YYYY-MM-DD` string that joins calendar cells with the
//! notes stored for that day. Keys are always built from local calendar fields,
//! never from a UTC instant.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{GardenError, Result};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key of a local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(String);

/// Formats the local calendar day of `date` as a zero-padded `YYYY-MM-DD` key.
///
/// Accepts anything carrying calendar fields: a `NaiveDate`, or a
/// `DateTime<Local>` whose local year/month/day are used. Two instants on the
/// same local day always produce the same key.
pub fn format_date_key<D: Datelike>(date: &D) -> DateKey {
    DateKey(format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    ))
}

impl DateKey {
    /// Parses and canonicalizes a key. `2024-2-5` becomes `2024-02-05`.
    pub fn parse(input: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(input.trim(), DATE_KEY_FORMAT).map_err(|_| {
            GardenError::InvalidDate {
                input: input.to_string(),
            }
        })?;
        Ok(format_date_key(&date))
    }

    /// The calendar day this key names.
    pub fn to_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DATE_KEY_FORMAT).map_err(|_| GardenError::InvalidDate {
            input: self.0.clone(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        format_date_key(&date)
    }
}

impl TryFrom<String> for DateKey {
    type Error = GardenError;

    fn try_from(value: String) -> Result<Self> {
        let key = DateKey::parse(&value)?;
        // Stored keys must already be canonical
        if key.0 != value {
            return Err(GardenError::InvalidDate { input: value });
        }
        Ok(key)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(format_date_key(&date).as_str(), "2024-02-05");
    }

    #[test]
    fn same_local_day_same_key() {
        let morning = Local.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        let night = Local.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(format_date_key(&morning), format_date_key(&night));
        assert_eq!(format_date_key(&morning).as_str(), "2024-03-09");
    }

    #[test]
    fn distinct_days_distinct_keys() {
        let start = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        let keys: std::collections::HashSet<DateKey> = start
            .iter_days()
            .take(400)
            .map(|d| format_date_key(&d))
            .collect();
        assert_eq!(keys.len(), 400);
    }

    #[test]
    fn parse_canonicalizes() {
        assert_eq!(DateKey::parse("2024-2-5").unwrap().as_str(), "2024-02-05");
        assert_eq!(DateKey::parse(" 2024-12-31 ").unwrap().as_str(), "2024-12-31");
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        assert!(DateKey::parse("2023-02-29").is_err());
        assert!(DateKey::parse("2024-13-01").is_err());
        assert!(DateKey::parse("yesterday").is_err());
    }

    #[test]
    fn deserialize_requires_canonical_form() {
        let ok: DateKey = serde_json::from_str("\"2024-02-29\"").unwrap();
        assert_eq!(ok.to_date().unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(serde_json::from_str::<DateKey>("\"2024-2-29\"").is_err());
    }
}
