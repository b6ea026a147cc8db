use std::f64::consts::{FRAC_PI_2, PI};
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface, LineJoin};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CellPrimitive, CellShape, Color, RenderFrame, Renderer, TextHAlign, TextVAlign,
    sawtooth_outline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub cells_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the current surface as a PNG file.
    pub fn write_png(&self, path: &Path) -> ChartResult<()> {
        let mut file = File::create(path).map_err(|err| {
            ChartError::InvalidData(format!("failed to create png `{}`: {err}", path.display()))
        })?;
        self.surface.write_to_png(&mut file).map_err(|err| {
            ChartError::InvalidData(format!("failed to write png `{}`: {err}", path.display()))
        })
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for cell in &frame.cells {
            draw_cell(context, cell)?;
            stats.cells_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };
            let y = match text.v_align {
                TextVAlign::Top => text.y,
                TextVAlign::Center => text.y - f64::from(text_height) / 2.0,
                TextVAlign::Bottom => text.y - f64::from(text_height),
            };

            apply_color(context, text.color);
            context.move_to(x, y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_cell(context: &Context, cell: &CellPrimitive) -> ChartResult<()> {
    // `alpha` in the pass-through extras scales both fill and edge opacity.
    let opacity = cell
        .extras
        .get("alpha")
        .and_then(serde_json::Value::as_f64)
        .map_or(1.0, |alpha| alpha.clamp(0.0, 1.0));

    append_cell_path(context, cell)?;
    apply_color(context, scale_alpha(cell.fill_color, opacity));
    if cell.edge_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill cell", err))?;
        apply_color(context, scale_alpha(cell.edge_color, opacity));
        context.set_line_width(cell.edge_width);
        context.set_line_join(match cell.shape {
            CellShape::Roundtooth { .. } => LineJoin::Round,
            _ => LineJoin::Miter,
        });
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke cell edge", err))?;
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill cell", err))?;
    }
    Ok(())
}

fn append_cell_path(context: &Context, cell: &CellPrimitive) -> ChartResult<()> {
    let CellPrimitive {
        x,
        y,
        width,
        height,
        ..
    } = *cell;

    match cell.shape {
        CellShape::Square => context.rectangle(x, y, width, height),
        CellShape::Circle => {
            let (cx, cy) = cell.center();
            context
                .save()
                .map_err(|err| map_backend_error("failed to save cairo state", err))?;
            context.translate(cx, cy);
            context.scale(width * 0.5, height * 0.5);
            context.new_sub_path();
            context.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        }
        CellShape::Rounded { radius_ratio } => {
            let radius = radius_ratio * width.min(height);
            append_rounded_rect(context, x, y, width, height, radius);
        }
        CellShape::Sawtooth { tooth_ratio } => {
            let points = sawtooth_outline(x, y, width, height, tooth_ratio);
            append_polygon(context, &points);
        }
        CellShape::Roundtooth { tooth_ratio } => {
            let points = sawtooth_outline(x, y, width, height, tooth_ratio);
            append_smoothed_polygon(context, &points);
        }
    }
    Ok(())
}

fn append_rounded_rect(context: &Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    if radius <= 0.0 {
        context.rectangle(x, y, width, height);
        return;
    }

    let radius = radius.min(width * 0.5).min(height * 0.5);
    let left = x;
    let top = y;
    let right = x + width;
    let bottom = y + height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn append_polygon(context: &Context, points: &[(f64, f64)]) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    context.new_sub_path();
    context.move_to(x0, y0);
    for &(x, y) in rest {
        context.line_to(x, y);
    }
    context.close_path();
}

/// Closed curve through the edge midpoints, using each vertex as control point.
fn append_smoothed_polygon(context: &Context, points: &[(f64, f64)]) {
    if points.len() < 3 {
        append_polygon(context, points);
        return;
    }
    let midpoint = |a: (f64, f64), b: (f64, f64)| ((a.0 + b.0) * 0.5, (a.1 + b.1) * 0.5);
    let count = points.len();
    let start = midpoint(points[count - 1], points[0]);

    context.new_sub_path();
    context.move_to(start.0, start.1);
    let mut current = start;
    for index in 0..count {
        let control = points[index];
        let next = midpoint(control, points[(index + 1) % count]);
        // Quadratic segment expressed as a cubic.
        let c1 = (
            current.0 + 2.0 / 3.0 * (control.0 - current.0),
            current.1 + 2.0 / 3.0 * (control.1 - current.1),
        );
        let c2 = (
            next.0 + 2.0 / 3.0 * (control.0 - next.0),
            next.1 + 2.0 / 3.0 * (control.1 - next.1),
        );
        context.curve_to(c1.0, c1.1, c2.0, c2.1, next.0, next.1);
        current = next;
    }
    context.close_path();
}

fn scale_alpha(color: Color, opacity: f64) -> Color {
    color.with_alpha(color.alpha * opacity)
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
