pub mod aggregate;
pub mod color_scale;
pub mod colormap;
pub mod date_input;
pub mod date_range;
pub mod legend;
pub mod month_outline;
pub mod types;
pub mod week_grid;

pub use aggregate::{DateValueMap, validate_observation_shape, value_extent};
pub use color_scale::{CellColorResolver, ColorScale, DEFAULT_NO_DATA_COLOR, ScaleOverrides};
pub use colormap::{
    Colormap, ColormapSpec, LinearSegmentedColormap, available_colormaps, named_colormap,
};
pub use date_input::{DateInput, date_inputs, parse_date, parse_iso_date};
pub use date_range::DisplayRange;
pub use legend::{MIN_LEGEND_BINS, format_auto_label, legend_samples};
pub use month_outline::{GridSegment, month_outline_segments};
pub use types::Viewport;
pub use week_grid::{DAYS_PER_WEEK, GridCoordinate, MonthStart, WeekGrid, WeekStart};
