use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use crate::core::{
    CellColorResolver, ColorScale, Colormap, DateInput, DateValueMap, DisplayRange,
    GridCoordinate, GridSegment, MonthStart, Viewport, WeekGrid, WeekStart,
    month_outline_segments,
};
use crate::error::ChartResult;
use crate::render::{CellHandle, Color, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::CalendarConfig;
use super::grid_geometry::{CellStyle, GridGeometry, estimate_text_width};
use super::legend_builder::{
    LEGEND_EDGE_LABEL_ROW, LEGEND_LABEL_ROW, LEGEND_LEADING_LABEL_COLUMN, LegendPlan, LegendPlot,
    emit_legend, plan_legend,
};
use super::validation::{ResolvedConfig, validate_calendar_config};

const WEEKDAY_ROWS: f64 = 7.0;

/// Non-fatal condition noticed while laying out a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotWarning {
    /// `color_for_none` was set but the scale is diverging, so no day uses it.
    NoDataColorIgnored,
}

impl fmt::Display for PlotWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDataColorIgnored => f.write_str(
                "`color_for_none` is ignored when the color scale is diverging",
            ),
        }
    }
}

/// One displayed day with its resolved value and fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub coordinate: GridCoordinate,
    /// Aggregated total, 0 for days without observations.
    pub value: f64,
    pub color: Color,
}

/// Result of one draw call: handles into the frame plus the resolved layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarPlot {
    /// One handle per displayed day, in date order.
    pub cells: Vec<CellHandle>,
    pub days: Vec<DayCell>,
    pub range: DisplayRange,
    pub week_start: WeekStart,
    pub total_weeks: u32,
    pub scale: ColorScale,
    pub month_starts: Vec<MonthStart>,
    pub month_outline: Vec<GridSegment>,
    pub legend: Option<LegendPlot>,
    pub warnings: Vec<PlotWarning>,
    pub geometry: GridGeometry,
    /// Bottom-right corner of everything drawn, in pixels.
    pub extent: (f64, f64),
}

impl CalendarPlot {
    /// Smallest viewport that fits the drawn chart.
    #[must_use]
    pub fn preferred_viewport(&self) -> Viewport {
        Viewport::enclosing(self.extent.0, self.extent.1)
    }

    /// Day drawn by `handle`, if it belongs to this plot.
    #[must_use]
    pub fn day(&self, handle: CellHandle) -> Option<&DayCell> {
        self.cells
            .iter()
            .position(|candidate| *candidate == handle)
            .and_then(|index| self.days.get(index))
    }
}

/// Validated calendar heatmap bound to a colormap.
///
/// Construction runs every configuration check up front; drawing only
/// validates the observations.
pub struct CalendarChart {
    config: CalendarConfig,
    resolved: ResolvedConfig,
    colormap: Box<dyn Colormap>,
    colormap_label: String,
}

impl fmt::Debug for CalendarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarChart")
            .field("config", &self.config)
            .field("week_start", &self.resolved.week_start)
            .field("colormap", &self.colormap_label)
            .finish()
    }
}

impl CalendarChart {
    pub fn new(config: CalendarConfig) -> ChartResult<Self> {
        let resolved = validate_calendar_config(&config)?;
        let colormap = config.cmap.resolve()?;
        let colormap_label = colormap.name().to_owned();
        debug!(
            week_start = %resolved.week_start,
            colormap = %colormap_label,
            legend = config.legend,
            "calendar chart configured"
        );
        Ok(Self {
            config,
            resolved,
            colormap: Box::new(colormap),
            colormap_label,
        })
    }

    /// Replaces the configured colormap with a caller-supplied one.
    #[must_use]
    pub fn with_colormap(mut self, colormap: impl Colormap + 'static) -> Self {
        self.colormap = Box::new(colormap);
        self.colormap_label = "custom".to_owned();
        self
    }

    #[must_use]
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    #[must_use]
    pub fn week_start(&self) -> WeekStart {
        self.resolved.week_start
    }

    /// Resolves everything about a draw without touching any frame.
    pub fn layout(&self, dates: &[DateInput], values: &[f64]) -> ChartResult<CalendarLayout<'_>> {
        let config = &self.config;
        let data = DateValueMap::from_observations(dates, values)?;
        let range = DisplayRange::resolve(
            &data,
            config.start_date.as_ref(),
            config.end_date.as_ref(),
        )?;
        let grid = WeekGrid::new(range, self.resolved.week_start)?;

        let outside = data.iter().filter(|(date, _)| !range.contains(**date)).count();
        if outside > 0 {
            debug!(outside, start = %range.start, end = %range.end, "dates outside display range");
        }

        let scale = ColorScale::from_values(data.values(), config.scale_overrides())?;
        let mut warnings = Vec::new();
        if scale.is_diverging() && config.color_for_none.is_some() {
            warn!("`color_for_none` is ignored because the color scale is diverging");
            warnings.push(PlotWarning::NoDataColorIgnored);
        }

        let resolver =
            CellColorResolver::new(scale, self.colormap.as_ref(), config.color_for_none);
        let days: Vec<DayCell> = grid
            .cells()
            .map(|(date, coordinate)| {
                let value = data.get(date).unwrap_or(0.0);
                DayCell {
                    date,
                    coordinate,
                    value,
                    color: resolver.color(value),
                }
            })
            .collect();

        let legend = if config.legend {
            Some(plan_legend(config, &resolver)?)
        } else {
            None
        };
        let month_outline = if config.month_grid {
            month_outline_segments(&grid)
        } else {
            Vec::new()
        };

        let total_weeks = grid.total_weeks();
        debug!(
            observations = dates.len(),
            distinct_days = data.len(),
            start = %range.start,
            end = %range.end,
            total_weeks,
            diverging = scale.is_diverging(),
            vmin = scale.vmin(),
            vmax = scale.vmax(),
            "calendar layout resolved"
        );

        let mut layout = CalendarLayout {
            chart: self,
            grid,
            scale,
            days,
            month_starts: grid.month_starts(),
            month_outline,
            legend,
            warnings,
            geometry: GridGeometry::new((0.0, 0.0), config.cell_px, config.box_scale),
            day_label_gap: 0.0,
            extent: (0.0, 0.0),
        };
        layout.place();
        Ok(layout)
    }

    /// Appends the chart to `frame`.
    ///
    /// Nothing is appended when any input or layout step fails.
    pub fn draw(
        &self,
        frame: &mut RenderFrame,
        dates: &[DateInput],
        values: &[f64],
    ) -> ChartResult<CalendarPlot> {
        Ok(self.layout(dates, values)?.emit(frame))
    }

    /// Draws into a frame sized to the chart and hands it to `renderer`.
    pub fn render<R: Renderer>(
        &self,
        renderer: &mut R,
        dates: &[DateInput],
        values: &[f64],
    ) -> ChartResult<(RenderFrame, CalendarPlot)> {
        let layout = self.layout(dates, values)?;
        let mut frame = RenderFrame::new(layout.preferred_viewport());
        let plot = layout.emit(&mut frame);
        renderer.render(&frame)?;
        Ok((frame, plot))
    }
}

/// Fully resolved draw plan of one chart; see [`CalendarChart::layout`].
#[derive(Debug)]
pub struct CalendarLayout<'a> {
    chart: &'a CalendarChart,
    grid: WeekGrid,
    scale: ColorScale,
    days: Vec<DayCell>,
    month_starts: Vec<MonthStart>,
    month_outline: Vec<GridSegment>,
    legend: Option<LegendPlan>,
    warnings: Vec<PlotWarning>,
    geometry: GridGeometry,
    day_label_gap: f64,
    extent: (f64, f64),
}

impl CalendarLayout<'_> {
    #[must_use]
    pub fn total_weeks(&self) -> u32 {
        self.grid.total_weeks()
    }

    #[must_use]
    pub fn range(&self) -> DisplayRange {
        self.grid.range()
    }

    #[must_use]
    pub fn scale(&self) -> ColorScale {
        self.scale
    }

    #[must_use]
    pub fn days(&self) -> &[DayCell] {
        &self.days
    }

    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    #[must_use]
    pub fn preferred_viewport(&self) -> Viewport {
        Viewport::enclosing(self.extent.0, self.extent.1)
    }

    fn place(&mut self) {
        let config = &self.chart.config;
        let pitch = config.cell_px;
        let grid_width = f64::from(self.grid.total_weeks()) * pitch;
        self.day_label_gap = config.day_x_margin * grid_width;

        let day_font = config.day_label_style.font_size_px;
        let widest_day_label = self
            .grid
            .week_start()
            .row_labels()
            .iter()
            .map(|label| estimate_text_width(label, day_font))
            .fold(0.0_f64, f64::max);
        let legend_bins = self.legend.as_ref().map(LegendPlan::bins);
        let edge_labels = config
            .legend_edge_labels
            .as_ref()
            .filter(|_| legend_bins.is_some());
        let edge_font = config.legend_edge_label_style.font_size_px;

        let origin = config.origin.unwrap_or_else(|| {
            let pad = pitch * 0.5;
            let mut left = widest_day_label + self.day_label_gap + pad;
            if let Some((less, _)) = edge_labels {
                let leading = estimate_text_width(less, edge_font);
                left = left.max(leading - LEGEND_LEADING_LABEL_COLUMN * pitch + pad);
            }
            let month_font = config.month_label_style.font_size_px;
            let top = config.month_y_margin * pitch + month_font * 0.5 + pad;
            (left, top)
        });
        self.geometry = GridGeometry::new(origin, pitch, config.box_scale);

        let mut right = self.geometry.x(f64::from(self.grid.total_weeks()));
        let mut bottom = self.geometry.y(WEEKDAY_ROWS);
        if let Some(bins) = legend_bins {
            let trailing = match edge_labels {
                Some((_, more)) => estimate_text_width(more, edge_font),
                None => 0.0,
            };
            right = right.max(self.geometry.x(bins as f64 + 0.5) + trailing);
            bottom = bottom.max(self.geometry.y(LEGEND_EDGE_LABEL_ROW) + edge_font * 0.5);
            if config.legend_labels.is_some() {
                bottom = bottom.max(self.geometry.y(LEGEND_LABEL_ROW));
            }
        }
        self.extent = (right + pitch * 0.5, bottom + pitch * 0.5);
    }

    /// Appends cells, labels, outlines and legend to `frame`.
    pub fn emit(self, frame: &mut RenderFrame) -> CalendarPlot {
        let config = &self.chart.config;
        let geometry = self.geometry;
        let style = CellStyle {
            edge_color: config.edge_color,
            edge_width: config.edge_width,
            shape: self.chart.resolved.shape,
            extras: Arc::new(config.style_extras.clone()),
        };

        let cells: Vec<CellHandle> = self
            .days
            .iter()
            .map(|day| {
                let column = f64::from(day.coordinate.week_index) + 0.5;
                let row = f64::from(day.coordinate.weekday_row) + 0.5;
                frame.push_cell(geometry.cell_at(column, row, day.color, &style))
            })
            .collect();

        let month_style = config.month_label_style;
        for month in &self.month_starts {
            frame.push_text(TextPrimitive::new(
                month.date.format("%b").to_string(),
                geometry.x(f64::from(month.week_index) + 0.5),
                geometry.y(-config.month_y_margin),
                month_style.font_size_px,
                month_style.color,
                TextHAlign::Center,
            ));
        }

        let day_style = config.day_label_style;
        let label_x = geometry.origin_x - self.day_label_gap;
        for (row, label) in self.grid.week_start().row_labels().iter().enumerate() {
            frame.push_text(TextPrimitive::new(
                *label,
                label_x,
                geometry.y(row as f64 + 0.5),
                day_style.font_size_px,
                day_style.color,
                TextHAlign::Right,
            ));
        }

        let line_style = config.month_grid_style;
        for segment in &self.month_outline {
            frame.push_line(geometry.line(
                (segment.x1 as f64, segment.y1 as f64),
                (segment.x2 as f64, segment.y2 as f64),
                line_style.width,
                line_style.color,
            ));
        }

        let legend = self
            .legend
            .map(|plan| emit_legend(plan, config, &geometry, &style, frame));

        trace!(
            cells = cells.len(),
            month_labels = self.month_starts.len(),
            outline_segments = self.month_outline.len(),
            "calendar emitted"
        );

        CalendarPlot {
            cells,
            days: self.days,
            range: self.grid.range(),
            week_start: self.grid.week_start(),
            total_weeks: self.grid.total_weeks(),
            scale: self.scale,
            month_starts: self.month_starts,
            month_outline: self.month_outline,
            legend,
            warnings: self.warnings,
            geometry,
            extent: self.extent,
        }
    }
}

/// One-shot helper: validates `config` and draws into `frame`.
pub fn calendar(
    frame: &mut RenderFrame,
    dates: &[DateInput],
    values: &[f64],
    config: &CalendarConfig,
) -> ChartResult<CalendarPlot> {
    CalendarChart::new(config.clone())?.draw(frame, dates, values)
}
