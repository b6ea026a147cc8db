use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::date_range::DisplayRange;
use crate::error::{ChartError, ChartResult};

pub const DAYS_PER_WEEK: u8 = 7;

/// Weekday occupying grid row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekStart {
    pub const ALL: [WeekStart; 7] = [
        WeekStart::Sunday,
        WeekStart::Monday,
        WeekStart::Tuesday,
        WeekStart::Wednesday,
        WeekStart::Thursday,
        WeekStart::Friday,
        WeekStart::Saturday,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
        }
    }

    /// Grid row of `weekday` when weeks start on `self`.
    #[must_use]
    pub fn row_of(self, weekday: Weekday) -> u8 {
        let natural = weekday.num_days_from_monday();
        let offset = self.weekday().num_days_from_monday();
        ((natural + 7 - offset) % 7) as u8
    }

    /// Abbreviated day labels in row order, e.g. `Mon`..`Sun` for a Monday start.
    #[must_use]
    pub fn row_labels(self) -> [&'static str; 7] {
        const SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        let first = self.weekday().num_days_from_sunday() as usize;
        std::array::from_fn(|row| SHORT[(first + row) % 7])
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeekStart {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::InvalidWeekStart(s.to_owned()))
    }
}

/// Cell position in the calendar grid: columns are weeks, rows are weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoordinate {
    pub week_index: u32,
    pub weekday_row: u8,
}

impl GridCoordinate {
    #[must_use]
    pub const fn new(week_index: u32, weekday_row: u8) -> Self {
        Self {
            week_index,
            weekday_row,
        }
    }
}

/// First day of a month inside the display range and its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthStart {
    pub date: NaiveDate,
    pub week_index: u32,
}

/// Maps dates of a display range onto week columns and weekday rows.
///
/// Week boundaries align to `week_start` no matter which weekday the range
/// starts on; the leading partial week is column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekGrid {
    range: DisplayRange,
    week_start: WeekStart,
    start_row: u8,
}

impl WeekGrid {
    pub fn new(range: DisplayRange, week_start: WeekStart) -> ChartResult<Self> {
        let range = range.validate()?;
        Ok(Self {
            range,
            week_start,
            start_row: week_start.row_of(range.start.weekday()),
        })
    }

    #[must_use]
    pub fn range(&self) -> DisplayRange {
        self.range
    }

    #[must_use]
    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Row of the range's first day; non-zero when the range starts mid-week.
    #[must_use]
    pub fn start_row(&self) -> u8 {
        self.start_row
    }

    /// Coordinate of `date`, or `None` outside the range.
    #[must_use]
    pub fn coordinate(&self, date: NaiveDate) -> Option<GridCoordinate> {
        if !self.range.contains(date) {
            return None;
        }
        let days_from_start = (date - self.range.start).num_days();
        Some(GridCoordinate {
            week_index: self.week_index_for_offset(days_from_start),
            weekday_row: self.week_start.row_of(date.weekday()),
        })
    }

    fn week_index_for_offset(&self, days_from_start: i64) -> u32 {
        ((days_from_start + i64::from(self.start_row)) / i64::from(DAYS_PER_WEEK)) as u32
    }

    /// Number of week columns, equal to the last column index plus one.
    #[must_use]
    pub fn total_weeks(&self) -> u32 {
        self.week_index_for_offset(self.range.span_days()) + 1
    }

    /// Every date of the range with its coordinate, in date order.
    pub fn cells(&self) -> impl Iterator<Item = (NaiveDate, GridCoordinate)> + '_ {
        self.range
            .dates()
            .filter_map(|date| self.coordinate(date).map(|coordinate| (date, coordinate)))
    }

    /// First-of-month dates in range, in date order.
    #[must_use]
    pub fn month_starts(&self) -> Vec<MonthStart> {
        self.range
            .dates()
            .filter(|date| date.day() == 1)
            .filter_map(|date| {
                self.coordinate(date).map(|coordinate| MonthStart {
                    date,
                    week_index: coordinate.week_index,
                })
            })
            .collect()
    }
}
