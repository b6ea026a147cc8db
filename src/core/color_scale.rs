use serde::{Deserialize, Serialize};

use crate::core::aggregate::value_extent;
use crate::core::colormap::Colormap;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Fill used for zero-valued days on a linear scale.
pub const DEFAULT_NO_DATA_COLOR: Color = Color::rgb(232.0 / 255.0, 232.0 / 255.0, 232.0 / 255.0);

/// Optional caller overrides for the scale bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleOverrides {
    #[serde(default)]
    pub vmin: Option<f64>,
    #[serde(default)]
    pub vmax: Option<f64>,
    #[serde(default)]
    pub vcenter: Option<f64>,
}

/// Value bounds and normalization mode for cell colors.
///
/// A scale with a center is diverging: values below the center normalize
/// into `[0, 0.5)`, values above into `(0.5, 1]`. Without a center the
/// normalization is straight proportional over `[vmin, vmax]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    vmin: f64,
    vmax: f64,
    vcenter: Option<f64>,
}

impl ColorScale {
    /// Linear scale over `[vmin, vmax]`.
    pub fn linear(vmin: f64, vmax: f64) -> ChartResult<Self> {
        ensure_finite("vmin", vmin)?;
        ensure_finite("vmax", vmax)?;
        if vmin > vmax {
            return Err(ChartError::InvalidConfig(format!(
                "vmin ({vmin}) must be <= vmax ({vmax})"
            )));
        }
        Ok(Self {
            vmin,
            vmax,
            vcenter: None,
        })
    }

    /// Diverging scale around `vcenter`.
    pub fn diverging(vmin: f64, vcenter: f64, vmax: f64) -> ChartResult<Self> {
        ensure_finite("vmin", vmin)?;
        ensure_finite("vcenter", vcenter)?;
        ensure_finite("vmax", vmax)?;
        if !(vmin <= vcenter && vcenter <= vmax) {
            return Err(ChartError::InvalidConfig(format!(
                "diverging scale needs vmin <= vcenter <= vmax (got {vmin}, {vcenter}, {vmax})"
            )));
        }
        Ok(Self {
            vmin,
            vmax,
            vcenter: Some(vcenter),
        })
    }

    /// Derives bounds and mode from aggregated values.
    ///
    /// `vmin`/`vmax` default to the data extent (`vmax` becomes 1 when the
    /// data maximum is exactly 0). The scale diverges around an explicit
    /// `vcenter`, or around 0 when the data holds both signs.
    pub fn from_values<I>(values: I, overrides: ScaleOverrides) -> ChartResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        for value in &values {
            ensure_finite("value", *value)?;
        }
        let (data_min, data_max) = value_extent(values).ok_or(ChartError::EmptyInput)?;

        let vmin = overrides.vmin.unwrap_or(data_min);
        let vmax = overrides
            .vmax
            .unwrap_or(if data_max == 0.0 { 1.0 } else { data_max });

        match overrides.vcenter {
            Some(vcenter) => Self::diverging(vmin, vcenter, vmax),
            None if data_min < 0.0 && data_max > 0.0 => Self::diverging(vmin, 0.0, vmax),
            None => Self::linear(vmin, vmax),
        }
    }

    #[must_use]
    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    #[must_use]
    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    #[must_use]
    pub fn vcenter(&self) -> Option<f64> {
        self.vcenter
    }

    #[must_use]
    pub fn is_diverging(&self) -> bool {
        self.vcenter.is_some()
    }

    /// Maps a raw value to the colormap domain.
    ///
    /// Results fall outside `[0, 1]` for values outside the bounds.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        match self.vcenter {
            Some(center) => {
                if value < center {
                    let span = center - self.vmin;
                    if span > 0.0 {
                        0.5 * (value - self.vmin) / span
                    } else {
                        0.0
                    }
                } else if value > center {
                    let span = self.vmax - center;
                    if span > 0.0 {
                        0.5 + 0.5 * (value - center) / span
                    } else {
                        1.0
                    }
                } else {
                    0.5
                }
            }
            None => {
                let span = self.vmax - self.vmin;
                if span > 0.0 {
                    (value - self.vmin) / span
                } else {
                    0.0
                }
            }
        }
    }
}

/// Resolves the fill of a day from its aggregated value.
pub struct CellColorResolver<'a> {
    scale: ColorScale,
    colormap: &'a dyn Colormap,
    no_data_color: Color,
}

impl<'a> CellColorResolver<'a> {
    #[must_use]
    pub fn new(
        scale: ColorScale,
        colormap: &'a dyn Colormap,
        no_data_color: Option<Color>,
    ) -> Self {
        Self {
            scale,
            colormap,
            no_data_color: no_data_color.unwrap_or(DEFAULT_NO_DATA_COLOR),
        }
    }

    #[must_use]
    pub fn scale(&self) -> ColorScale {
        self.scale
    }

    /// Whether `value` gets the no-data fill instead of a colormap color.
    #[must_use]
    pub fn is_no_data(&self, value: f64) -> bool {
        !self.scale.is_diverging() && value == 0.0
    }

    #[must_use]
    pub fn color(&self, value: f64) -> Color {
        if self.is_no_data(value) {
            self.no_data_color
        } else {
            self.colormap.sample(self.scale.normalize(value))
        }
    }
}

fn ensure_finite(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!("{name} must be finite")))
    }
}
