mod calendar;
mod config;
mod grid_geometry;
mod legend_builder;
mod styles;
mod validation;

pub use calendar::{CalendarChart, CalendarLayout, CalendarPlot, DayCell, PlotWarning, calendar};
pub use config::{
    BoxStyleSpec, CALENDAR_CONFIG_JSON_SCHEMA_V1, CalendarConfig, CalendarConfigJsonContractV1,
    IMPLEMENTED_BOX_STYLES, LabelStyle, LegendLabels, LineStyle, UNIMPLEMENTED_BOX_STYLES,
};
pub use grid_geometry::{CELL_FILL_RATIO, CellStyle, GridGeometry, estimate_text_width};
pub use legend_builder::{
    LEGEND_EDGE_LABEL_ROW, LEGEND_LABEL_ROW, LEGEND_LEADING_LABEL_COLUMN, LEGEND_ROW_CENTER,
    LegendPlot,
};
pub use styles::{PRESET_NAMES, preset_config};
