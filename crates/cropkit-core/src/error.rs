//! Error types for controller construction.
//!
//! Geometry operations never fail; invalid drags are clamped or dropped.
//! Errors are only raised when a controller is built from bad input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CropError {
    /// The source image has a zero dimension.
    #[error("Image must not be empty, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// A fixed aspect ratio that is not a positive finite number.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f32),

    /// Display density that is not a positive finite number.
    #[error("Invalid display density: {0}")]
    InvalidDensity(f32),

    #[error("Invalid handle radius: {0}")]
    InvalidHandleRadius(f32),

    #[error("Invalid touch padding: {0}")]
    InvalidTouchPadding(f32),

    /// Raw pixel buffer length does not match the declared dimensions.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    PixelBufferMismatch { expected: usize, actual: usize },
}
