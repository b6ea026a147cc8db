//! daychart-rs: calendar heatmaps (contributions-style charts).
//!
//! Dated observations are summed per day, laid out on a week-by-weekday grid,
//! colored through a linear or diverging scale and emitted as backend-agnostic
//! draw commands into a `RenderFrame`.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod telemetry;

pub use crate::api::{CalendarChart, CalendarConfig, CalendarPlot, calendar, preset_config};
pub use crate::core::{DateInput, Viewport, WeekStart};
pub use crate::error::{ChartError, ChartResult};
