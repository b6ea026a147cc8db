/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Smallest viewport enclosing `width` x `height` pixels of content.
    #[must_use]
    pub fn enclosing(width: f64, height: f64) -> Self {
        let side = |value: f64| {
            if value.is_finite() && value > 0.0 {
                value.ceil().min(f64::from(u32::MAX)) as u32
            } else {
                1
            }
        };
        Self::new(side(width), side(height))
    }
}
