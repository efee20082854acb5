//! Bitmap transforms: quarter-turn rotation, axis flips and cropping.
//!
//! # Coordinate System
//!
//! - Crop rects arrive in canvas space and are mapped into pixel space of
//!   the bitmap being cropped
//! - The mapping is affine per axis: `pixels / displayed image rect size`
//! - Origin is top-left corner

mod crop;
mod orientation;

pub use crop::{apply_crop, map_crop_to_pixels, PixelRect};
pub use orientation::ImageTransform;
