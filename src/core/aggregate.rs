use std::collections::BTreeMap;
use std::collections::btree_map;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;

use crate::core::date_input::{DateInput, parse_date};
use crate::error::{ChartError, ChartResult};

/// Per-date totals built from raw observations.
///
/// Keys are unique calendar dates; each value is the sum of every
/// observation that fell on that date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateValueMap {
    totals: BTreeMap<NaiveDate, f64>,
}

impl DateValueMap {
    /// Aggregates parallel `dates`/`values` sequences.
    ///
    /// Length mismatch is reported before emptiness.
    pub fn from_observations(dates: &[DateInput], values: &[f64]) -> ChartResult<Self> {
        validate_observation_shape(dates.len(), values.len())?;

        let mut map = Self::default();
        for (date, value) in dates.iter().zip(values) {
            map.add(parse_date(date)?, *value)?;
        }
        Ok(map)
    }

    /// Aggregates already-parsed `(date, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut map = Self::default();
        for (date, value) in pairs {
            map.add(date, value)?;
        }
        if map.is_empty() {
            return Err(ChartError::EmptyInput);
        }
        Ok(map)
    }

    fn add(&mut self, date: NaiveDate, value: f64) -> ChartResult<()> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "value for {date} must be finite"
            )));
        }
        *self.totals.entry(date).or_insert(0.0) += value;
        Ok(())
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.totals.get(&date).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.totals.keys().next().copied()
    }

    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.totals.keys().next_back().copied()
    }

    /// Smallest and largest aggregated totals.
    #[must_use]
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        value_extent(self.values())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.totals.values().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, NaiveDate, f64> {
        self.totals.iter()
    }
}

impl<'a> IntoIterator for &'a DateValueMap {
    type Item = (&'a NaiveDate, &'a f64);
    type IntoIter = btree_map::Iter<'a, NaiveDate, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Smallest and largest of `values` in one pass, `None` when empty.
pub fn value_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .map(OrderedFloat)
        .fold(None, |extent, value| {
            Some(match extent {
                Some((min, max)) => (Ord::min(min, value), Ord::max(max, value)),
                None => (value, value),
            })
        })
        .map(|(min, max)| (min.into_inner(), max.into_inner()))
}

/// Checks the `dates`/`values` shape without parsing anything.
pub fn validate_observation_shape(dates_len: usize, values_len: usize) -> ChartResult<()> {
    if dates_len != values_len {
        return Err(ChartError::LengthMismatch {
            dates: dates_len,
            values: values_len,
        });
    }
    if dates_len == 0 {
        return Err(ChartError::EmptyInput);
    }
    Ok(())
}
