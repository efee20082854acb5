//! Rotate and flip descriptors applied to the working bitmap.

use serde::{Deserialize, Serialize};

/// A lossless re-orientation of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageTransform {
    /// Rotate 90 degrees clockwise.
    RotateClockwise,
    /// Rotate 90 degrees anti-clockwise.
    RotateAntiClockwise,
    /// Mirror left to right.
    FlipHorizontal,
    /// Mirror top to bottom.
    FlipVertical,
}
