use chrono::{Days, NaiveDate};

use crate::core::aggregate::DateValueMap;
use crate::core::date_input::{DateInput, parse_date};
use crate::error::{ChartError, ChartResult};

/// Inclusive calendar range shown by the chart.
///
/// Construction does not check ordering; see [`DisplayRange::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DisplayRange {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Resolves explicit bounds, falling back to the data's first/last date
    /// for any bound left out.
    pub fn resolve(
        data: &DateValueMap,
        start: Option<&DateInput>,
        end: Option<&DateInput>,
    ) -> ChartResult<Self> {
        let start = match start {
            Some(input) => parse_date(input)?,
            None => data.first_date().ok_or(ChartError::EmptyInput)?,
        };
        let end = match end {
            Some(input) => parse_date(input)?,
            None => data.last_date().ok_or(ChartError::EmptyInput)?,
        };
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn is_inverted(self) -> bool {
        self.end < self.start
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.is_inverted() {
            return Err(ChartError::InvertedDateRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self)
    }

    /// Signed distance from `start` to `end` in days.
    #[must_use]
    pub fn span_days(self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Number of calendar days covered, zero for an inverted range.
    #[must_use]
    pub fn day_count(self) -> usize {
        usize::try_from(self.span_days() + 1).unwrap_or(0)
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date from `start` to `end`, inclusive and in order.
    pub fn dates(self) -> impl Iterator<Item = NaiveDate> {
        let count = self.day_count() as u64;
        let start = self.start;
        (0..count).filter_map(move |offset| start.checked_add_days(Days::new(offset)))
    }
}
