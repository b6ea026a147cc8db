use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CellPrimitive, LinePrimitive, TextPrimitive};

/// Index of a cell drawn into a [`RenderFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellHandle(usize);

impl CellHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitives are only ever appended; handles returned by `push_cell` stay
/// valid for the lifetime of the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub cells: Vec<CellPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            cells: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    pub fn push_cell(&mut self, cell: CellPrimitive) -> CellHandle {
        self.cells.push(cell);
        CellHandle(self.cells.len() - 1)
    }

    #[must_use]
    pub fn cell(&self, handle: CellHandle) -> Option<&CellPrimitive> {
        self.cells.get(handle.0)
    }

    /// Mutable access for caller-side restyling of a drawn cell.
    pub fn cell_mut(&mut self, handle: CellHandle) -> Option<&mut CellPrimitive> {
        self.cells.get_mut(handle.0)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for cell in &self.cells {
            cell.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.cells.is_empty() && self.texts.is_empty()
    }
}
