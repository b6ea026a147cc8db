use crate::core::ColormapSpec;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{BoxStyleSpec, CalendarConfig, LabelStyle};

/// Names accepted by [`preset_config`].
pub const PRESET_NAMES: [&str; 2] = ["default", "github"];

const GITHUB_BACKGROUND: Color = Color::rgb(21.0 / 255.0, 27.0 / 255.0, 35.0 / 255.0);

impl CalendarConfig {
    /// Dark contributions-page look: rounded boxes on a green ramp.
    #[must_use]
    pub fn github() -> Self {
        let labels = LabelStyle::new(Color::WHITE, 12.0);
        Self::default()
            .with_box_style(BoxStyleSpec::named("round"))
            .with_cmap(ColormapSpec::Named("github".to_owned()))
            .with_day_label_style(labels)
            .with_month_label_style(labels)
            .with_color_for_none(Some(GITHUB_BACKGROUND))
            .with_margins(0.03, 0.6)
            .with_box_scale(0.85)
    }
}

/// Looks up a bundled style preset by name (case-insensitive).
pub fn preset_config(name: &str) -> ChartResult<CalendarConfig> {
    match name.trim().to_ascii_lowercase().as_str() {
        "default" => Ok(CalendarConfig::default()),
        "github" => Ok(CalendarConfig::github()),
        _ => Err(ChartError::InvalidConfig(format!(
            "unknown style preset `{name}`, expected one of: {}",
            PRESET_NAMES.join(", ")
        ))),
    }
}
