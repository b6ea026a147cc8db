use serde::{Deserialize, Serialize};

use crate::core::{ColormapSpec, DateInput, ScaleOverrides};
use crate::error::{ChartError, ChartResult};
use crate::render::{CellShape, Color, StyleExtras};

pub const CALENDAR_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Box style names that draw a cell.
pub const IMPLEMENTED_BOX_STYLES: [&str; 6] =
    ["square", "circle", "round", "round4", "sawtooth", "roundtooth"];

/// Box style names that are recognized but cannot be drawn yet.
pub const UNIMPLEMENTED_BOX_STYLES: [&str; 4] = ["ellipse", "larrow", "rarrow", "darrow"];

/// Cell outline selection: a named style or a custom rounded box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoxStyleSpec {
    Name(String),
    Custom { corner_radius_ratio: f64 },
}

impl Default for BoxStyleSpec {
    fn default() -> Self {
        Self::Name("square".to_owned())
    }
}

impl BoxStyleSpec {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Resolves the renderer shape for this style.
    pub fn to_shape(&self) -> ChartResult<CellShape> {
        let name = match self {
            Self::Custom {
                corner_radius_ratio,
            } => {
                let shape = CellShape::Rounded {
                    radius_ratio: *corner_radius_ratio,
                };
                shape.validate().map_err(|_| {
                    ChartError::InvalidConfig(format!(
                        "corner_radius_ratio must be in [0, 0.5], got {corner_radius_ratio}"
                    ))
                })?;
                return Ok(shape);
            }
            Self::Name(name) => name.as_str(),
        };

        match name {
            "square" => Ok(CellShape::Square),
            "circle" => Ok(CellShape::Circle),
            "round" => Ok(CellShape::Rounded { radius_ratio: 0.25 }),
            "round4" => Ok(CellShape::Rounded { radius_ratio: 0.4 }),
            "sawtooth" => Ok(CellShape::Sawtooth { tooth_ratio: 0.2 }),
            "roundtooth" => Ok(CellShape::Roundtooth { tooth_ratio: 0.2 }),
            other if UNIMPLEMENTED_BOX_STYLES.contains(&other) => Err(
                ChartError::NotImplemented(format!("box style `{other}` is not implemented yet")),
            ),
            other => Err(ChartError::InvalidBoxStyle {
                name: other.to_owned(),
                expected: IMPLEMENTED_BOX_STYLES.join(", "),
            }),
        }
    }
}

/// Per-bin legend label source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendLabels {
    /// Rounded sample values.
    Auto,
    /// Caller text, one entry per legend bin.
    Explicit(Vec<String>),
}

/// Text styling shared by month, weekday and legend labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    #[serde(default = "default_label_color")]
    pub color: Color,
    #[serde(default = "default_label_font_size_px")]
    pub font_size_px: f64,
}

impl LabelStyle {
    #[must_use]
    pub const fn new(color: Color, font_size_px: f64) -> Self {
        Self {
            color,
            font_size_px,
        }
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::new(default_label_color(), default_label_font_size_px())
    }
}

/// Stroke styling for month boundary lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default = "default_line_color")]
    pub color: Color,
    #[serde(default = "default_line_width")]
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: default_line_color(),
            width: default_line_width(),
        }
    }
}

/// Per-call calendar heatmap configuration.
///
/// Every field has a default, so `{}` is a valid JSON config. Geometry is in
/// pixels except the margins, which are fractions of the grid (see field
/// docs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub start_date: Option<DateInput>,
    #[serde(default)]
    pub end_date: Option<DateInput>,
    #[serde(default = "default_week_starts_on")]
    pub week_starts_on: String,
    #[serde(default)]
    pub cmap: ColormapSpec,
    #[serde(default)]
    pub vmin: Option<f64>,
    #[serde(default)]
    pub vmax: Option<f64>,
    #[serde(default)]
    pub vcenter: Option<f64>,
    /// Fill for zero-valued days on a linear scale; `#e8e8e8` when unset.
    #[serde(default)]
    pub color_for_none: Option<Color>,
    #[serde(default = "default_edge_color")]
    pub edge_color: Color,
    #[serde(default)]
    pub edge_width: f64,
    #[serde(default)]
    pub box_style: BoxStyleSpec,
    #[serde(default = "default_box_scale")]
    pub box_scale: f64,
    #[serde(default)]
    pub legend: bool,
    #[serde(default = "default_legend_bins")]
    pub legend_bins: usize,
    #[serde(default)]
    pub legend_labels: Option<LegendLabels>,
    #[serde(default)]
    pub legend_labels_precision: Option<u32>,
    #[serde(default = "default_legend_label_style")]
    pub legend_label_style: LabelStyle,
    #[serde(default = "default_legend_edge_labels")]
    pub legend_edge_labels: Option<(String, String)>,
    #[serde(default = "default_legend_edge_label_style")]
    pub legend_edge_label_style: LabelStyle,
    #[serde(default)]
    pub month_label_style: LabelStyle,
    #[serde(default)]
    pub day_label_style: LabelStyle,
    /// Gap between weekday labels and the grid, as a fraction of grid width.
    #[serde(default = "default_day_x_margin")]
    pub day_x_margin: f64,
    /// Gap between month labels and the grid, in cell units.
    #[serde(default = "default_month_y_margin")]
    pub month_y_margin: f64,
    #[serde(default)]
    pub month_grid: bool,
    #[serde(default)]
    pub month_grid_style: LineStyle,
    #[serde(default = "default_cell_px")]
    pub cell_px: f64,
    /// Top-left corner of the grid; derived from label sizes when unset.
    #[serde(default)]
    pub origin: Option<(f64, f64)>,
    /// Forwarded untouched on every drawn cell.
    #[serde(default)]
    pub style_extras: StyleExtras,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: CalendarConfig,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            week_starts_on: default_week_starts_on(),
            cmap: ColormapSpec::default(),
            vmin: None,
            vmax: None,
            vcenter: None,
            color_for_none: None,
            edge_color: default_edge_color(),
            edge_width: 0.0,
            box_style: BoxStyleSpec::default(),
            box_scale: default_box_scale(),
            legend: false,
            legend_bins: default_legend_bins(),
            legend_labels: None,
            legend_labels_precision: None,
            legend_label_style: default_legend_label_style(),
            legend_edge_labels: default_legend_edge_labels(),
            legend_edge_label_style: default_legend_edge_label_style(),
            month_label_style: LabelStyle::default(),
            day_label_style: LabelStyle::default(),
            day_x_margin: default_day_x_margin(),
            month_y_margin: default_month_y_margin(),
            month_grid: false,
            month_grid_style: LineStyle::default(),
            cell_px: default_cell_px(),
            origin: None,
            style_extras: StyleExtras::new(),
        }
    }
}

impl CalendarConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets explicit display bounds; `None` falls back to the data extent.
    #[must_use]
    pub fn with_date_range(
        mut self,
        start_date: Option<DateInput>,
        end_date: Option<DateInput>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    #[must_use]
    pub fn with_week_starts_on(mut self, day: impl Into<String>) -> Self {
        self.week_starts_on = day.into();
        self
    }

    #[must_use]
    pub fn with_cmap(mut self, cmap: ColormapSpec) -> Self {
        self.cmap = cmap;
        self
    }

    #[must_use]
    pub fn with_cmap_name(self, name: impl Into<String>) -> Self {
        self.with_cmap(ColormapSpec::Named(name.into()))
    }

    /// Sets scale bound overrides.
    #[must_use]
    pub fn with_scale_bounds(
        mut self,
        vmin: Option<f64>,
        vmax: Option<f64>,
        vcenter: Option<f64>,
    ) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self.vcenter = vcenter;
        self
    }

    #[must_use]
    pub fn with_color_for_none(mut self, color: Option<Color>) -> Self {
        self.color_for_none = color;
        self
    }

    #[must_use]
    pub fn with_edge(mut self, color: Color, width: f64) -> Self {
        self.edge_color = color;
        self.edge_width = width;
        self
    }

    #[must_use]
    pub fn with_box_style(mut self, box_style: BoxStyleSpec) -> Self {
        self.box_style = box_style;
        self
    }

    #[must_use]
    pub fn with_box_scale(mut self, box_scale: f64) -> Self {
        self.box_scale = box_scale;
        self
    }

    /// Enables the legend with `bins` samples.
    #[must_use]
    pub fn with_legend(mut self, bins: usize) -> Self {
        self.legend = true;
        self.legend_bins = bins;
        self
    }

    #[must_use]
    pub fn with_legend_labels(
        mut self,
        labels: Option<LegendLabels>,
        precision: Option<u32>,
    ) -> Self {
        self.legend_labels = labels;
        self.legend_labels_precision = precision;
        self
    }

    #[must_use]
    pub fn with_legend_label_style(mut self, style: LabelStyle) -> Self {
        self.legend_label_style = style;
        self
    }

    #[must_use]
    pub fn with_legend_edge_labels(mut self, labels: Option<(String, String)>) -> Self {
        self.legend_edge_labels = labels;
        self
    }

    #[must_use]
    pub fn with_legend_edge_label_style(mut self, style: LabelStyle) -> Self {
        self.legend_edge_label_style = style;
        self
    }

    #[must_use]
    pub fn with_month_label_style(mut self, style: LabelStyle) -> Self {
        self.month_label_style = style;
        self
    }

    #[must_use]
    pub fn with_day_label_style(mut self, style: LabelStyle) -> Self {
        self.day_label_style = style;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, day_x_margin: f64, month_y_margin: f64) -> Self {
        self.day_x_margin = day_x_margin;
        self.month_y_margin = month_y_margin;
        self
    }

    #[must_use]
    pub fn with_month_grid(mut self, style: Option<LineStyle>) -> Self {
        self.month_grid = true;
        if let Some(style) = style {
            self.month_grid_style = style;
        }
        self
    }

    #[must_use]
    pub fn with_cell_px(mut self, cell_px: f64) -> Self {
        self.cell_px = cell_px;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Option<(f64, f64)>) -> Self {
        self.origin = origin;
        self
    }

    /// Adds one pass-through style option for every drawn cell.
    #[must_use]
    pub fn with_style_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.style_extras.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn scale_overrides(&self) -> ScaleOverrides {
        ScaleOverrides {
            vmin: self.vmin,
            vmax: self.vmax,
            vcenter: self.vcenter,
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse calendar config json: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize calendar config: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = CalendarConfigJsonContractV1 {
            schema_version: CALENDAR_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse calendar config json: {e}"))
        })?;
        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidConfig(format!("failed to parse calendar config json: {e}"))
            });
        }
        let payload: CalendarConfigJsonContractV1 = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse config contract payload: {e}"))
        })?;
        if payload.schema_version != CALENDAR_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidConfig(format!(
                "unsupported calendar config schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.config)
    }
}

fn default_week_starts_on() -> String {
    "Sunday".to_owned()
}

fn default_edge_color() -> Color {
    Color::BLACK
}

fn default_box_scale() -> f64 {
    1.0
}

fn default_legend_bins() -> usize {
    4
}

fn default_legend_label_style() -> LabelStyle {
    LabelStyle::new(Color::BLACK, 7.0)
}

fn default_legend_edge_labels() -> Option<(String, String)> {
    Some(("Less".to_owned(), "More".to_owned()))
}

fn default_legend_edge_label_style() -> LabelStyle {
    LabelStyle::new(Color::BLACK, 8.0)
}

fn default_label_color() -> Color {
    Color::BLACK
}

fn default_label_font_size_px() -> f64 {
    10.0
}

fn default_line_color() -> Color {
    Color::BLACK
}

fn default_line_width() -> f64 {
    1.0
}

fn default_day_x_margin() -> f64 {
    0.02
}

fn default_month_y_margin() -> f64 {
    0.4
}

fn default_cell_px() -> f64 {
    14.0
}
