//! Mapping a canvas-space crop rect onto bitmap pixels.
//!
//! The crop rect lives in canvas units, relative to the displayed image
//! rect. Cropping scales it by `bitmap size / displayed image rect size` on
//! each axis, truncates to whole pixels and clamps into the bitmap.
//!
//! # Example
//!
//! ```ignore
//! // 2000x1000 source displayed at {0, 250, 1000x500}
//! let image_rect = Rect::new(0.0, 250.0, 1000.0, 750.0);
//! let crop_rect = Rect::new(100.0, 300.0, 300.0, 400.0);
//! let px = map_crop_to_pixels(crop_rect, image_rect, 2000, 1000);
//! assert_eq!(px, PixelRect::new(200, 100, 400, 200));
//! ```

use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::geometry::Rect;

/// Region of a bitmap in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Map `crop_rect` into the pixel space of a `width x height` bitmap shown at
/// `image_rect`.
///
/// # Behavior
///
/// - Scaled coordinates are truncated toward zero
/// - `x` and `y` are clamped into `[0, width]` and `[0, height]`
/// - The size is clamped so the region ends inside the bitmap
/// - An empty `image_rect` maps to an empty region
pub fn map_crop_to_pixels(crop_rect: Rect, image_rect: Rect, width: u32, height: u32) -> PixelRect {
    let display = image_rect.size();
    if display.is_empty() {
        return PixelRect::default();
    }

    let scale_x = width as f32 / display.width;
    let scale_y = height as f32 / display.height;

    let crop_x = ((crop_rect.left - image_rect.left) * scale_x) as i64;
    let crop_y = ((crop_rect.top - image_rect.top) * scale_y) as i64;
    let crop_width = (crop_rect.width() * scale_x) as i64;
    let crop_height = (crop_rect.height() * scale_y) as i64;

    let (width, height) = (i64::from(width), i64::from(height));
    let x = crop_x.clamp(0, width);
    let y = crop_y.clamp(0, height);
    let w = crop_width.clamp(0, width - x);
    let h = crop_height.clamp(0, height - y);

    PixelRect::new(x as u32, y as u32, w as u32, h as u32)
}

/// Crop `bitmap`, displayed at `image_rect`, to `crop_rect`.
///
/// A selection that maps to zero pixels returns a copy of the whole bitmap.
pub fn apply_crop<B: Bitmap>(bitmap: &B, crop_rect: Rect, image_rect: Rect) -> B {
    let region = map_crop_to_pixels(crop_rect, image_rect, bitmap.width(), bitmap.height());

    // Fast path: full-size region returns a clone
    let full = PixelRect::new(0, 0, bitmap.width(), bitmap.height());
    if region.is_empty() || region == full {
        return bitmap.clone();
    }

    bitmap.sub_image(region)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
