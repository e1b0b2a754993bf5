use chrono::{Local, NaiveDate};

use crate::{is_supported, DateKey, GardenError, NoteType, Result};

/// Parses a day argument: `today` or `YYYY-MM-DD`.
pub fn parse_date_arg(input: &str) -> Result<DateKey> {
    parse_date_arg_with_today(input, Local::now().date_naive())
}

pub fn parse_date_arg_with_today(input: &str, today: NaiveDate) -> Result<DateKey> {
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(DateKey::from(today)),
        _ => DateKey::parse(input),
    }
}

/// Parses a `YYYY-MM` month argument into day 1 of that month. Months
/// outside the displayable years are rejected.
pub fn parse_month_arg(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .ok()
        .filter(|date| is_supported(*date))
        .ok_or_else(|| GardenError::InvalidMonth {
            input: input.to_string(),
        })
}

pub fn parse_note_type(input: &str) -> Result<NoteType> {
    input.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_keyword() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(
            parse_date_arg_with_today("Today", today).unwrap().as_str(),
            "2024-07-04"
        );
        assert_eq!(
            parse_date_arg_with_today("2024-01-02", today).unwrap().as_str(),
            "2024-01-02"
        );
    }

    #[test]
    fn month_argument() {
        assert_eq!(
            parse_month_arg("2024-02").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert!(matches!(
            parse_month_arg("2024-13"),
            Err(GardenError::InvalidMonth { .. })
        ));
        assert!(parse_month_arg("February").is_err());
        assert!(parse_month_arg("0000-01").is_err());
        assert!(parse_month_arg("+10000-01").is_err());
    }
}
