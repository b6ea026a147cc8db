use std::sync::Arc;

use crate::render::{CellPrimitive, CellShape, Color, LinePrimitive, StyleExtras};

/// Fraction of a grid slot covered by a cell at `box_scale == 1`.
pub const CELL_FILL_RATIO: f64 = 0.8;

/// Maps grid units (one unit per week column / weekday row) to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pitch: f64,
    pub cell_size: f64,
}

impl GridGeometry {
    #[must_use]
    pub fn new(origin: (f64, f64), pitch: f64, box_scale: f64) -> Self {
        Self {
            origin_x: origin.0,
            origin_y: origin.1,
            pitch,
            cell_size: pitch * CELL_FILL_RATIO * box_scale,
        }
    }

    #[must_use]
    pub fn x(&self, grid_x: f64) -> f64 {
        self.origin_x + grid_x * self.pitch
    }

    #[must_use]
    pub fn y(&self, grid_y: f64) -> f64 {
        self.origin_y + grid_y * self.pitch
    }

    /// Cell of `cell_size` centered on grid point (`grid_x`, `grid_y`).
    #[must_use]
    pub fn cell_at(
        &self,
        grid_x: f64,
        grid_y: f64,
        fill: Color,
        style: &CellStyle,
    ) -> CellPrimitive {
        let half = self.cell_size * 0.5;
        CellPrimitive {
            x: self.x(grid_x) - half,
            y: self.y(grid_y) - half,
            width: self.cell_size,
            height: self.cell_size,
            fill_color: fill,
            edge_color: style.edge_color,
            edge_width: style.edge_width,
            shape: style.shape,
            extras: Arc::clone(&style.extras),
        }
    }

    #[must_use]
    pub fn line(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    ) -> LinePrimitive {
        LinePrimitive::new(
            self.x(from.0),
            self.y(from.1),
            self.x(to.0),
            self.y(to.1),
            width,
            color,
        )
    }
}

/// Outline settings shared by every cell of one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub edge_color: Color,
    pub edge_width: f64,
    pub shape: CellShape,
    pub extras: Arc<StyleExtras>,
}

/// Rough rendered width of `text` used for default margins.
#[must_use]
pub fn estimate_text_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * 0.6
}
