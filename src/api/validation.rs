use crate::core::{MIN_LEGEND_BINS, WeekStart, parse_date};
use crate::error::{ChartError, ChartResult};
use crate::render::CellShape;

use super::{CalendarConfig, LabelStyle, LegendLabels, LineStyle};

/// Config fields resolved into typed values by [`validate_calendar_config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ResolvedConfig {
    pub week_start: WeekStart,
    pub shape: CellShape,
}

pub(super) fn validate_calendar_config(config: &CalendarConfig) -> ChartResult<ResolvedConfig> {
    let shape = config.box_style.to_shape()?;
    let week_start: WeekStart = config.week_starts_on.parse()?;

    validate_geometry(config)?;
    validate_scale_overrides(config)?;
    validate_legend(config)?;

    config.edge_color.validate()?;
    if let Some(color) = config.color_for_none {
        color.validate()?;
    }
    validate_label_style("month_label_style", config.month_label_style)?;
    validate_label_style("day_label_style", config.day_label_style)?;
    validate_label_style("legend_label_style", config.legend_label_style)?;
    validate_label_style("legend_edge_label_style", config.legend_edge_label_style)?;
    validate_line_style("month_grid_style", config.month_grid_style)?;

    for bound in [&config.start_date, &config.end_date].into_iter().flatten() {
        parse_date(bound)?;
    }

    Ok(ResolvedConfig { week_start, shape })
}

fn validate_geometry(config: &CalendarConfig) -> ChartResult<()> {
    if !config.cell_px.is_finite() || config.cell_px <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "cell_px must be finite and > 0".to_owned(),
        ));
    }
    if !config.box_scale.is_finite() || config.box_scale <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "box_scale must be finite and > 0".to_owned(),
        ));
    }
    if !config.edge_width.is_finite() || config.edge_width < 0.0 {
        return Err(ChartError::InvalidConfig(
            "edge_width must be finite and >= 0".to_owned(),
        ));
    }
    for (name, value) in [
        ("day_x_margin", config.day_x_margin),
        ("month_y_margin", config.month_y_margin),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }
    if let Some((x, y)) = config.origin {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidConfig(
                "origin must be finite".to_owned(),
            ));
        }
    }
    Ok(())
}

fn validate_scale_overrides(config: &CalendarConfig) -> ChartResult<()> {
    for (name, value) in [
        ("vmin", config.vmin),
        ("vmax", config.vmax),
        ("vcenter", config.vcenter),
    ] {
        if value.is_some_and(|value| !value.is_finite()) {
            return Err(ChartError::InvalidConfig(format!("{name} must be finite")));
        }
    }
    if let (Some(vmin), Some(vmax)) = (config.vmin, config.vmax) {
        if vmin > vmax {
            return Err(ChartError::InvalidConfig(format!(
                "vmin ({vmin}) must be <= vmax ({vmax})"
            )));
        }
    }
    Ok(())
}

fn validate_legend(config: &CalendarConfig) -> ChartResult<()> {
    if !config.legend {
        return Ok(());
    }
    if config.legend_bins < MIN_LEGEND_BINS {
        return Err(ChartError::InvalidConfig(format!(
            "legend_bins must be >= {MIN_LEGEND_BINS}, got {}",
            config.legend_bins
        )));
    }
    if let Some(LegendLabels::Explicit(labels)) = &config.legend_labels {
        if labels.len() < config.legend_bins {
            return Err(ChartError::InvalidConfig(format!(
                "legend_labels has {} entries but legend_bins is {}",
                labels.len(),
                config.legend_bins
            )));
        }
    }
    if config
        .legend_labels_precision
        .is_some_and(|precision| precision > 12)
    {
        return Err(ChartError::InvalidConfig(
            "legend_labels_precision must be <= 12".to_owned(),
        ));
    }
    Ok(())
}

fn validate_label_style(name: &str, style: LabelStyle) -> ChartResult<()> {
    if !style.font_size_px.is_finite() || style.font_size_px <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{name}.font_size_px must be finite and > 0"
        )));
    }
    style.color.validate()
}

fn validate_line_style(name: &str, style: LineStyle) -> ChartResult<()> {
    if !style.width.is_finite() || style.width <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{name}.width must be finite and > 0"
        )));
    }
    style.color.validate()
}
