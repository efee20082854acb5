//! Drag handles placed on the corners and edge midpoints of the crop rect.
//!
//! Handles are always derived from a crop rect and a radius; they are never
//! moved on their own.

use crate::geometry::{Offset, Rect};
use serde::{Deserialize, Serialize};

/// One of the eight grabbable hotspots of the crop rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl DragHandle {
    /// Every handle, in hit-test priority order.
    pub const ALL: [DragHandle; 8] = [
        DragHandle::TopLeft,
        DragHandle::Top,
        DragHandle::TopRight,
        DragHandle::Right,
        DragHandle::BottomRight,
        DragHandle::Bottom,
        DragHandle::BottomLeft,
        DragHandle::Left,
    ];

    /// Corner handles, in hit-test priority order.
    pub const CORNERS: [DragHandle; 4] = [
        DragHandle::TopLeft,
        DragHandle::TopRight,
        DragHandle::BottomRight,
        DragHandle::BottomLeft,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            DragHandle::TopLeft
                | DragHandle::TopRight
                | DragHandle::BottomRight
                | DragHandle::BottomLeft
        )
    }

    pub fn moves_left(self) -> bool {
        matches!(
            self,
            DragHandle::TopLeft | DragHandle::Left | DragHandle::BottomLeft
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            DragHandle::TopRight | DragHandle::Right | DragHandle::BottomRight
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            DragHandle::TopLeft | DragHandle::Top | DragHandle::TopRight
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            DragHandle::BottomLeft | DragHandle::Bottom | DragHandle::BottomRight
        )
    }

    /// Point of `rect` this handle sits on.
    pub fn position(self, rect: &Rect) -> Offset {
        let center = rect.center();
        let x = if self.moves_left() {
            rect.left
        } else if self.moves_right() {
            rect.right
        } else {
            center.x
        };
        let y = if self.moves_top() {
            rect.top
        } else if self.moves_bottom() {
            rect.bottom
        } else {
            center.y
        };
        Offset::new(x, y)
    }
}

/// The eight handle rectangles of a crop rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Handles {
    pub top_left: Rect,
    pub top: Rect,
    pub top_right: Rect,
    pub right: Rect,
    pub bottom_right: Rect,
    pub bottom: Rect,
    pub bottom_left: Rect,
    pub left: Rect,
}

impl Handles {
    /// Squares of side `2 * radius` centered on each corner and edge midpoint.
    pub fn new(rect: Rect, radius: f32) -> Self {
        let at = |handle: DragHandle| Rect::from_center(handle.position(&rect), radius);
        Self {
            top_left: at(DragHandle::TopLeft),
            top: at(DragHandle::Top),
            top_right: at(DragHandle::TopRight),
            right: at(DragHandle::Right),
            bottom_right: at(DragHandle::BottomRight),
            bottom: at(DragHandle::Bottom),
            bottom_left: at(DragHandle::BottomLeft),
            left: at(DragHandle::Left),
        }
    }

    pub fn get(&self, handle: DragHandle) -> Rect {
        match handle {
            DragHandle::TopLeft => self.top_left,
            DragHandle::Top => self.top,
            DragHandle::TopRight => self.top_right,
            DragHandle::Right => self.right,
            DragHandle::BottomRight => self.bottom_right,
            DragHandle::Bottom => self.bottom,
            DragHandle::BottomLeft => self.bottom_left,
            DragHandle::Left => self.left,
        }
    }

    /// All handle rectangles, for rendering.
    pub fn all(&self) -> Vec<Rect> {
        DragHandle::ALL.iter().map(|h| self.get(*h)).collect()
    }

    /// Corner handle rectangles, for rendering constrained shapes.
    pub fn corners(&self) -> Vec<Rect> {
        DragHandle::CORNERS.iter().map(|h| self.get(*h)).collect()
    }

    /// Rectangles to draw: every handle when `with_edges`, corners otherwise.
    pub fn visible(&self, with_edges: bool) -> Vec<Rect> {
        if with_edges {
            self.all()
        } else {
            self.corners()
        }
    }

    pub fn named_all(&self) -> Vec<(DragHandle, Rect)> {
        DragHandle::ALL.iter().map(|h| (*h, self.get(*h))).collect()
    }

    pub fn named_corners(&self) -> Vec<(DragHandle, Rect)> {
        DragHandle::CORNERS.iter().map(|h| (*h, self.get(*h))).collect()
    }

    /// First handle whose rectangle, grown by `padding` on every side,
    /// contains `point`.
    pub fn hit_test(&self, point: Offset, padding: f32, with_edges: bool) -> Option<DragHandle> {
        let candidates = if with_edges {
            self.named_all()
        } else {
            self.named_corners()
        };

        candidates
            .into_iter()
            .find(|(_, rect)| rect.inflate(padding).contains(point))
            .map(|(handle, _)| handle)
    }
}
