//! Rectangle geometry for field placement.

use crate::error::AssembleError;

/// Axis-aligned rectangle in PDF user space (origin bottom-left).
///
/// Invariant: `llx < urx` and `lly < ury`. Construction goes through
/// [`Rect::from_origin`], which computes the upper-right corner from a
/// lower-left origin plus a positive extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    llx: f64,
    lly: f64,
    urx: f64,
    ury: f64,
}

impl Rect {
    /// Build a rectangle from its lower-left corner and extent.
    ///
    /// Rejects zero or negative width/height before any corner arithmetic,
    /// so a degenerate or inverted rectangle can never be represented.
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Result<Self, AssembleError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(AssembleError::InvalidRect { width, height });
        }
        Ok(Self {
            llx: x,
            lly: y,
            urx: x + width,
            ury: y + height,
        })
    }

    pub fn llx(&self) -> f64 {
        self.llx
    }

    pub fn lly(&self) -> f64 {
        self.lly
    }

    pub fn urx(&self) -> f64 {
        self.urx
    }

    pub fn ury(&self) -> f64 {
        self.ury
    }

    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }
}
