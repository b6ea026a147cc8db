use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Caller-supplied styling options forwarded verbatim to the renderer.
pub type StyleExtras = IndexMap<String, serde_json::Value>;

/// RGBA color in normalized 0..=1 channel values.
///
/// Serializes as `#rrggbb` (or `#rrggbbaa` when translucent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` or one of a few CSS names.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "none" | "transparent" => return Ok(Self::TRANSPARENT),
            "gray" | "grey" => return Ok(Self::rgb8(128, 128, 128)),
            "lightgray" | "lightgrey" => return Ok(Self::rgb8(211, 211, 211)),
            _ => {}
        }

        let invalid = || ChartError::InvalidData(format!("invalid color `{input}`"));
        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        match hex.len() {
            3 => {
                let expand = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Self::rgb8(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => {
                let base = Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?);
                Ok(base.with_alpha(f64::from(channel(6..8)?) / 255.0))
            }
            _ => Err(invalid()),
        }
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Channel-wise linear interpolation, `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let rgb = format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        );
        if byte(self.alpha) == u8::MAX {
            rgb
        } else {
            format!("{rgb}{:02x}", byte(self.alpha))
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Outline drawn for a cell inside its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellShape {
    Square,
    /// Ellipse inscribed in the bounding box.
    Circle,
    /// Rounded rectangle; radius is a fraction of the shorter side.
    Rounded { radius_ratio: f64 },
    /// Rectangle whose edges are zig-zags; `tooth_ratio` scales the teeth.
    Sawtooth { tooth_ratio: f64 },
    /// Sawtooth with round joins.
    Roundtooth { tooth_ratio: f64 },
}

impl CellShape {
    pub fn validate(self) -> ChartResult<()> {
        let ratio = match self {
            Self::Square | Self::Circle => return Ok(()),
            Self::Rounded { radius_ratio } => radius_ratio,
            Self::Sawtooth { tooth_ratio } | Self::Roundtooth { tooth_ratio } => tooth_ratio,
        };
        if !ratio.is_finite() || !(0.0..=0.5).contains(&ratio) {
            return Err(ChartError::InvalidData(
                "cell shape ratio must be finite and in [0, 0.5]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Draw command for one heatmap cell in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub edge_color: Color,
    pub edge_width: f64,
    pub shape: CellShape,
    pub extras: Arc<StyleExtras>,
}

impl CellPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            edge_color: Color::BLACK,
            edge_width: 0.0,
            shape: CellShape::Square,
            extras: Arc::default(),
        }
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "cell coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ChartError::InvalidData(
                "cell size must be finite and > 0".to_owned(),
            ));
        }
        if !self.edge_width.is_finite() || self.edge_width < 0.0 {
            return Err(ChartError::InvalidData(
                "cell edge width must be finite and >= 0".to_owned(),
            ));
        }
        self.shape.validate()?;
        self.fill_color.validate()?;
        self.edge_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align: TextVAlign::Center,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Closed polygon approximating a zig-zag outline around a box.
///
/// Teeth are spaced evenly along each edge and point outwards by
/// `tooth_ratio * min(width, height)`.
#[must_use]
pub fn sawtooth_outline(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    tooth_ratio: f64,
) -> Vec<(f64, f64)> {
    let tooth = tooth_ratio * width.min(height);
    if tooth <= 0.0 {
        return vec![
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ];
    }

    let corners = [
        ((x, y), (x + width, y), (0.0, -1.0)),
        ((x + width, y), (x + width, y + height), (1.0, 0.0)),
        ((x + width, y + height), (x, y + height), (0.0, 1.0)),
        ((x, y + height), (x, y), (-1.0, 0.0)),
    ];

    let mut points = Vec::new();
    for ((x1, y1), (x2, y2), (nx, ny)) in corners {
        let length = (x2 - x1).abs() + (y2 - y1).abs();
        let teeth = ((length / (2.0 * tooth)).floor() as usize).max(1);
        let steps = teeth * 2;
        for step in 0..steps {
            let t = step as f64 / steps as f64;
            let offset = if step % 2 == 1 { tooth * 0.5 } else { 0.0 };
            points.push((
                x1 + (x2 - x1) * t + nx * offset,
                y1 + (y2 - y1) * t + ny * offset,
            ));
        }
    }
    points
}
