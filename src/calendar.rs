//! Month grid generation.
//!
//! A grid is always 6 weeks of 7 days, Sunday first. It starts with the
//! trailing days of the previous month, then every day of the displayed month,
//! then leading days of the next month until 42 cells are filled. Month
//! lengths and leap years fall out of the date arithmetic.
//!
//! Months are supported from year [`MIN_YEAR`] to [`MAX_YEAR`]. Grids for
//! dates outside that range are built for the nearest supported month, and
//! navigation past either end yields `None`.

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::Serialize;

use crate::{format_date_key, DateKey};

/// Number of cells in a month grid (6 rows of 7 days)
pub const GRID_CELLS: usize = 42;

/// First year whose months can be displayed
pub const MIN_YEAR: i32 = 1;

/// Last year whose months can be displayed
pub const MAX_YEAR: i32 = 9999;

/// Header row matching the Sunday-first grid
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One day slot of the rendered month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub date_key: DateKey,
    /// False for padding days borrowed from the adjacent months
    pub is_current_month: bool,
    pub is_today: bool,
}

/// Builds the grid for the month containing `reference`, flagging today's
/// local date.
pub fn build_grid(reference: NaiveDate) -> Vec<CalendarCell> {
    build_grid_with_today(reference, Local::now().date_naive())
}

/// Builds the grid for the month containing `reference` with an explicit
/// `today`.
pub fn build_grid_with_today(reference: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    let today_key = format_date_key(&today);
    let first = first_of_month(clamp_to_supported(reference));
    let lead = first.weekday().num_days_from_sunday();
    // Supported months always have room for the padding on both sides
    let start = first - Days::new(u64::from(lead));

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let date_key = format_date_key(&date);
            CalendarCell {
                is_current_month: date.year() == first.year() && date.month() == first.month(),
                is_today: date_key == today_key,
                date,
                date_key,
            }
        })
        .collect()
}

/// Day 1 of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Whether the month containing `date` can be displayed
pub fn is_supported(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

fn clamp_to_supported(date: NaiveDate) -> NaiveDate {
    let year = date.year().clamp(MIN_YEAR, MAX_YEAR);
    if year == date.year() {
        return date;
    }
    let month = if year == MIN_YEAR { 1 } else { 12 };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Day 1 of the month before the one containing `date`
pub fn previous_month(date: NaiveDate) -> Option<NaiveDate> {
    shift_months(date, -1)
}

/// Day 1 of the month after the one containing `date`
pub fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    shift_months(date, 1)
}

/// Day 1 of the month `offset` months away, if that month is supported
pub fn shift_months(date: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let first = first_of_month(date);
    let months = Months::new(offset.unsigned_abs());
    let target = if offset < 0 {
        first.checked_sub_months(months)
    } else {
        first.checked_add_months(months)
    }?;
    is_supported(target).then_some(target)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .count() as u32
}

/// Title for the month header, e.g. `February 2024`
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
