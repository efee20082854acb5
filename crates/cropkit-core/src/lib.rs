//! Cropkit Core - Interactive image cropping
//!
//! This crate holds the platform-independent part of an image cropper: the
//! crop rect geometry, drag handle hit-testing and resizing, the crop state
//! machine and the mapping of the on-screen selection back to source pixels.
//! Rendering is left to the caller, which feeds in gestures and canvas sizes
//! and draws whatever [`CropState`] it is handed.

pub mod bitmap;
pub mod controller;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod guides;
pub mod handles;
pub mod manager;
pub mod options;
pub mod state;
pub mod transform;

pub use bitmap::{Bitmap, ScaleFilter};
pub use controller::{CropAction, CropController, StateStream};
pub use error::CropError;
pub use geometry::{calculate_scaled_size, rect_contains, ContentScale, Offset, Rect, Size};
pub use guides::{draws_ellipse, grid_lines, LineSegment};
pub use handles::{DragHandle, Handles};
pub use manager::{CropStateManager, MIN_CROP_SIZE};
pub use options::{CropOptions, CropRatio, CropShape, GridlineStyle, GridlinesVisibility};
pub use state::{CropLayout, CropState, DragMode, Layout};
pub use transform::{apply_crop, map_crop_to_pixels, ImageTransform, PixelRect};
