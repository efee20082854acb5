//! Gridline geometry for the crop overlay.
//!
//! The renderer decides *when* to draw gridlines from
//! `CropState::gridlines_active`; this module only says *what* to draw for
//! a given [`GridlineStyle`].

use serde::{Deserialize, Serialize};

use crate::geometry::{Offset, Rect};
use crate::options::GridlineStyle;

/// A straight line in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Offset,
    pub end: Offset,
}

impl LineSegment {
    pub fn new(start: Offset, end: Offset) -> Self {
        Self { start, end }
    }

    fn vertical(x: f32, rect: &Rect) -> Self {
        Self::new(Offset::new(x, rect.top), Offset::new(x, rect.bottom))
    }

    fn horizontal(y: f32, rect: &Rect) -> Self {
        Self::new(Offset::new(rect.left, y), Offset::new(rect.right, y))
    }
}

/// Straight lines to draw inside `rect` for `style`.
///
/// Vertical lines come first, left to right, then horizontal lines top to
/// bottom. [`GridlineStyle::Circle`] has no straight lines.
pub fn grid_lines(rect: Rect, style: GridlineStyle) -> Vec<LineSegment> {
    match style {
        GridlineStyle::Grid | GridlineStyle::GridAndCircle => {
            let third_w = rect.width() / 3.0;
            let third_h = rect.height() / 3.0;
            vec![
                LineSegment::vertical(rect.left + third_w, &rect),
                LineSegment::vertical(rect.left + 2.0 * third_w, &rect),
                LineSegment::horizontal(rect.top + third_h, &rect),
                LineSegment::horizontal(rect.top + 2.0 * third_h, &rect),
            ]
        }
        GridlineStyle::Crosshair => {
            let center = rect.center();
            vec![
                LineSegment::vertical(center.x, &rect),
                LineSegment::horizontal(center.y, &rect),
            ]
        }
        GridlineStyle::Circle => Vec::new(),
    }
}

/// Whether `style` includes an ellipse inscribed in the crop rect.
pub fn draws_ellipse(style: GridlineStyle) -> bool {
    matches!(style, GridlineStyle::Circle | GridlineStyle::GridAndCircle)
}
