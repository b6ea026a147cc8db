mod frame;
mod null_renderer;
mod primitives;

pub use frame::{CellHandle, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CellPrimitive, CellShape, Color, LinePrimitive, StyleExtras, TextHAlign, TextPrimitive,
    TextVAlign, sawtooth_outline,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from calendar layout and color logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
