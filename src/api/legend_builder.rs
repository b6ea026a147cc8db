use tracing::trace;

use crate::core::{CellColorResolver, format_auto_label, legend_samples};
use crate::error::ChartResult;
use crate::render::{CellHandle, Color, RenderFrame, TextHAlign, TextPrimitive, TextVAlign};

use super::grid_geometry::{CellStyle, GridGeometry};
use super::{CalendarConfig, LegendLabels};

/// Grid row (center) of the legend cells, below the seven weekday rows.
pub const LEGEND_ROW_CENTER: f64 = 7.95;
/// Grid row of the per-bin label baseline.
pub const LEGEND_LABEL_ROW: f64 = 9.0;
/// Grid row of the `Less`/`More` edge labels.
pub const LEGEND_EDGE_LABEL_ROW: f64 = 8.0;
/// Column of the leading edge label, right-aligned.
pub const LEGEND_LEADING_LABEL_COLUMN: f64 = -0.6;

/// Legend cells and labels emitted for one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendPlot {
    pub cells: Vec<CellHandle>,
    pub samples: Vec<f64>,
    pub colors: Vec<Color>,
    /// Per-bin labels; empty when `legend_labels` is unset.
    pub labels: Vec<String>,
}

/// Legend content resolved before anything is drawn.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct LegendPlan {
    samples: Vec<f64>,
    colors: Vec<Color>,
    labels: Vec<String>,
}

impl LegendPlan {
    pub(super) fn bins(&self) -> usize {
        self.samples.len()
    }
}

pub(super) fn plan_legend(
    config: &CalendarConfig,
    resolver: &CellColorResolver<'_>,
) -> ChartResult<LegendPlan> {
    let scale = resolver.scale();
    let samples = legend_samples(scale.vmin(), scale.vmax(), config.legend_bins)?;
    let colors = samples.iter().map(|value| resolver.color(*value)).collect();
    let labels = match &config.legend_labels {
        None => Vec::new(),
        Some(LegendLabels::Auto) => samples
            .iter()
            .map(|value| format_auto_label(*value, config.legend_labels_precision))
            .collect(),
        Some(LegendLabels::Explicit(labels)) => {
            labels.iter().take(samples.len()).cloned().collect()
        }
    };
    Ok(LegendPlan {
        samples,
        colors,
        labels,
    })
}

pub(super) fn emit_legend(
    plan: LegendPlan,
    config: &CalendarConfig,
    geometry: &GridGeometry,
    style: &CellStyle,
    frame: &mut RenderFrame,
) -> LegendPlot {
    let mut cells = Vec::with_capacity(plan.bins());
    for (index, color) in plan.colors.iter().enumerate() {
        let column = index as f64 + 0.5;
        cells.push(frame.push_cell(geometry.cell_at(column, LEGEND_ROW_CENTER, *color, style)));
    }

    let label_style = config.legend_label_style;
    for (index, label) in plan.labels.iter().enumerate() {
        if label.is_empty() {
            continue;
        }
        frame.push_text(
            TextPrimitive::new(
                label.clone(),
                geometry.x(index as f64 + 0.5),
                geometry.y(LEGEND_LABEL_ROW),
                label_style.font_size_px,
                label_style.color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Bottom),
        );
    }

    if let Some((less, more)) = &config.legend_edge_labels {
        let edge_style = config.legend_edge_label_style;
        let edges = [
            (less, LEGEND_LEADING_LABEL_COLUMN, TextHAlign::Right),
            (more, plan.bins() as f64 + 0.5, TextHAlign::Left),
        ];
        for (text, column, h_align) in edges {
            if text.is_empty() {
                continue;
            }
            frame.push_text(TextPrimitive::new(
                text.clone(),
                geometry.x(column),
                geometry.y(LEGEND_EDGE_LABEL_ROW),
                edge_style.font_size_px,
                edge_style.color,
                h_align,
            ));
        }
    }

    trace!(
        bins = plan.bins(),
        labels = plan.labels.len(),
        "legend emitted"
    );

    LegendPlot {
        cells,
        samples: plan.samples,
        colors: plan.colors,
        labels: plan.labels,
    }
}
