use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One date-like input accepted by the calendar pipeline.
///
/// `Unsupported` only appears when converting from loosely-typed sources
/// (for example JSON numbers) and is always rejected by [`parse_date`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum DateInput {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
    Text(String),
    Unsupported { kind: String },
}

impl DateInput {
    /// Resolves this input to a calendar date.
    pub fn to_date(&self) -> ChartResult<NaiveDate> {
        parse_date(self)
    }
}

/// Normalizes any supported date shape into a calendar date.
///
/// Strings must match `YYYY-MM-DD` exactly. Date-times keep the date in their
/// own offset; no timezone conversion happens.
pub fn parse_date(input: &DateInput) -> ChartResult<NaiveDate> {
    match input {
        DateInput::Date(date) => Ok(*date),
        DateInput::DateTime(date_time) => Ok(date_time.date()),
        DateInput::Zoned(date_time) => Ok(date_time.date_naive()),
        DateInput::Text(text) => parse_iso_date(text),
        DateInput::Unsupported { kind } => Err(ChartError::UnsupportedDateType(kind.clone())),
    }
}

/// Parses a strict `YYYY-MM-DD` string.
pub fn parse_iso_date(text: &str) -> ChartResult<NaiveDate> {
    if !has_iso_date_shape(text) {
        return Err(ChartError::InvalidDateFormat(text.to_owned()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ChartError::InvalidDateFormat(text.to_owned()))
}

fn has_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, byte)| match i {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Zoned(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Zoned(value.fixed_offset())
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for DateInput {
    fn from(value: Value) -> Self {
        let kind = match value {
            Value::String(text) => return Self::Text(text),
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Self::Unsupported {
            kind: kind.to_owned(),
        }
    }
}

impl From<DateInput> for Value {
    fn from(value: DateInput) -> Self {
        match value {
            // Only the calendar date survives serialization.
            DateInput::Date(date) => Value::String(date.format(DATE_FORMAT).to_string()),
            DateInput::DateTime(date_time) => {
                Value::String(date_time.date().format(DATE_FORMAT).to_string())
            }
            DateInput::Zoned(date_time) => {
                Value::String(date_time.date_naive().format(DATE_FORMAT).to_string())
            }
            DateInput::Text(text) => Value::String(text),
            DateInput::Unsupported { .. } => Value::Null,
        }
    }
}

/// Converts a slice of date-like values into owned inputs.
#[must_use]
pub fn date_inputs<T>(dates: &[T]) -> Vec<DateInput>
where
    T: Clone + Into<DateInput>,
{
    dates.iter().cloned().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::has_iso_date_shape;

    #[test]
    fn iso_shape_requires_zero_padding() {
        assert!(has_iso_date_shape("2024-01-05"));
        assert!(!has_iso_date_shape("2024-1-05"));
        assert!(!has_iso_date_shape("2024/01/05"));
        assert!(!has_iso_date_shape("2024-01-05T00:00"));
        assert!(!has_iso_date_shape("２０２４-01-05"));
    }
}
