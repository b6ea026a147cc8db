use chrono::NaiveDate;
use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("`dates` and `values` must have the same length (got {dates} dates, {values} values)")]
    LengthMismatch { dates: usize, values: usize },

    #[error("`dates` and `values` cannot be empty")]
    EmptyInput,

    #[error("unsupported date type: {0}")]
    UnsupportedDateType(String),

    #[error("date `{0}` does not match the `YYYY-MM-DD` format")]
    InvalidDateFormat(String),

    #[error("invalid box style `{name}`, must be one of {expected}")]
    InvalidBoxStyle { name: String, expected: String },

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("invalid week start `{0}`, must be a full day name such as `Sunday`")]
    InvalidWeekStart(String),

    #[error("invalid colormap: {0}")]
    InvalidColormap(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("inverted date range: start {start} is after end {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[cfg(feature = "github")]
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}
