//! Geometry primitives for the crop state machine.
//!
//! All values are in canvas (display) units unless stated otherwise.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the canvas
//! - x grows to the right, y grows downwards
//! - Rectangles are stored as edges (`left`, `top`, `right`, `bottom`)

use serde::{Deserialize, Serialize};

/// A point or a displacement in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Offset {
    /// True when both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.x, -self.y)
    }
}

/// Width and height in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative, infinite or NaN.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite())
    }
}

/// Axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_offset_size(offset: Offset, size: Size) -> Self {
        Self::new(
            offset.x,
            offset.y,
            offset.x + size.width,
            offset.y + size.height,
        )
    }

    /// Square of side `2 * radius` centered on `center`.
    pub fn from_center(center: Offset, radius: f32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Offset {
        Offset::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Returns the rectangle grown by `delta` on every side.
    pub fn inflate(&self, delta: f32) -> Rect {
        Rect::new(
            self.left - delta,
            self.top - delta,
            self.right + delta,
            self.bottom + delta,
        )
    }

    pub fn contains(&self, point: Offset) -> bool {
        rect_contains(point, *self)
    }
}

/// Rule for scaling source dimensions into a destination box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentScale {
    /// Preserve aspect ratio, largest size that fits entirely inside.
    #[default]
    Fit,
    /// Preserve aspect ratio, smallest size that covers the destination.
    Crop,
    /// Stretch to the destination, ignoring aspect ratio.
    FillBounds,
    /// Preserve aspect ratio, match the destination width.
    FillWidth,
    /// Preserve aspect ratio, match the destination height.
    FillHeight,
    /// Like `Fit`, but never scales up.
    Inside,
    /// Keep the source size.
    None,
}

/// Compute the size a `src_width x src_height` source is drawn at inside a
/// `dst_width x dst_height` box under the given policy.
///
/// Zero, negative or non-finite inputs produce [`Size::ZERO`].
///
/// # Example
///
/// ```ignore
/// let size = calculate_scaled_size(2000.0, 1000.0, 1000.0, 1000.0, ContentScale::Fit);
/// assert_eq!(size, Size::new(1000.0, 500.0));
/// ```
pub fn calculate_scaled_size(
    src_width: f32,
    src_height: f32,
    dst_width: f32,
    dst_height: f32,
    content_scale: ContentScale,
) -> Size {
    let inputs = [src_width, src_height, dst_width, dst_height];
    if inputs.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return Size::ZERO;
    }

    let width_ratio = dst_width / src_width;
    let height_ratio = dst_height / src_height;

    let scale = match content_scale {
        ContentScale::FillBounds => return Size::new(dst_width, dst_height),
        ContentScale::None => return Size::new(src_width, src_height),
        ContentScale::Fit => width_ratio.min(height_ratio),
        ContentScale::Crop => width_ratio.max(height_ratio),
        ContentScale::FillWidth => width_ratio,
        ContentScale::FillHeight => height_ratio,
        ContentScale::Inside => width_ratio.min(height_ratio).min(1.0),
    };

    Size::new(src_width * scale, src_height * scale)
}

/// Inclusive containment test: edges count as inside.
pub fn rect_contains(point: Offset, rect: Rect) -> bool {
    point.x >= rect.left && point.x <= rect.right && point.y >= rect.top && point.y <= rect.bottom
}

/// Rectangle of `content` size centered inside a `container` anchored at the origin.
///
/// Offsets are negative when the content overflows the container.
pub fn centered_rect(container: Size, content: Size) -> Rect {
    let offset = Offset::new(
        (container.width - content.width) / 2.0,
        (container.height - content.height) / 2.0,
    );
    Rect::from_offset_size(offset, content)
}

/// Largest rectangle with `width / height == aspect_ratio` that fits in
/// `bounds`, centered.
pub fn largest_rect_with_ratio(bounds: Rect, aspect_ratio: f32) -> Rect {
    let available = bounds.size();

    let mut width = available.width;
    let mut height = width / aspect_ratio;
    if height > available.height {
        height = available.height;
        width = height * aspect_ratio;
    }

    let offset = Offset::new(
        bounds.left + (available.width - width) / 2.0,
        bounds.top + (available.height - height) / 2.0,
    );
    Rect::from_offset_size(offset, Size::new(width, height))
}
