//! Controller configuration.
//!
//! Options are fixed for the lifetime of a controller; changing the crop
//! shape means building a new controller.

use serde::{Deserialize, Serialize};

use crate::bitmap::ScaleFilter;
use crate::error::CropError;
use crate::geometry::ContentScale;

/// Geometric constraint applied to the crop rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CropShape {
    /// No constraint.
    #[default]
    FreeForm,
    /// Fixed `width / height` ratio.
    AspectRatio { ratio: f32 },
    /// The working image's own ratio, recomputed after rotation.
    Original,
    /// Fixed 1:1 ratio.
    Square,
}

impl CropShape {
    /// Ratio constraint for an image of the given size, `None` for free-form.
    pub fn aspect_ratio(&self, image_width: u32, image_height: u32) -> Option<f32> {
        match self {
            CropShape::FreeForm => None,
            CropShape::AspectRatio { ratio } => Some(*ratio),
            CropShape::Original => Some(image_width as f32 / image_height as f32),
            CropShape::Square => Some(CropRatio::SQUARE),
        }
    }

    pub fn is_free_form(&self) -> bool {
        matches!(self, CropShape::FreeForm)
    }
}

/// Common `width / height` presets for [`CropShape::AspectRatio`].
pub struct CropRatio;

impl CropRatio {
    pub const SQUARE: f32 = 1.0;
    pub const R4_3: f32 = 4.0 / 3.0;
    pub const R3_4: f32 = 3.0 / 4.0;
    pub const R16_9: f32 = 16.0 / 9.0;
    pub const R9_16: f32 = 9.0 / 16.0;
    pub const R3_2: f32 = 3.0 / 2.0;
    pub const R2_3: f32 = 2.0 / 3.0;
    pub const R5_4: f32 = 5.0 / 4.0;
}

/// When gridlines are shown over the crop rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridlinesVisibility {
    Always,
    /// Only while a drag is in progress.
    #[default]
    OnTouch,
    Never,
}

/// What the renderer draws as gridlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridlineStyle {
    /// Rule-of-thirds grid.
    #[default]
    Grid,
    /// Ellipse inscribed in the crop rect; the overlay cut-out is oval.
    Circle,
    GridAndCircle,
    /// Horizontal and vertical center lines.
    Crosshair,
}

/// Configuration surface for a crop controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    pub shape: CropShape,
    pub content_scale: ContentScale,
    pub gridlines: GridlinesVisibility,
    pub gridline_style: GridlineStyle,
    /// Handle radius in density-independent units.
    pub handle_radius: f32,
    /// Extra hit area around each handle, in density-independent units.
    pub touch_padding: f32,
    /// Pixels per density-independent unit.
    pub density: f32,
    /// Filter used for the display-sized copy of the image.
    pub preview_filter: ScaleFilter,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            shape: CropShape::FreeForm,
            content_scale: ContentScale::Fit,
            gridlines: GridlinesVisibility::OnTouch,
            gridline_style: GridlineStyle::Grid,
            handle_radius: 8.0,
            touch_padding: 10.0,
            density: 1.0,
            preview_filter: ScaleFilter::Bilinear,
        }
    }
}

impl CropOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: CropShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_gridlines(mut self, gridlines: GridlinesVisibility) -> Self {
        self.gridlines = gridlines;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_preview_filter(mut self, filter: ScaleFilter) -> Self {
        self.preview_filter = filter;
        self
    }

    pub fn handle_radius_px(&self) -> f32 {
        self.handle_radius * self.density
    }

    pub fn touch_padding_px(&self) -> f32 {
        self.touch_padding * self.density
    }

    /// Edge handles are only drawn and grabbable without a ratio constraint.
    pub fn shows_edge_handles(&self) -> bool {
        self.shape.is_free_form()
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), CropError> {
        if let CropShape::AspectRatio { ratio } = self.shape {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(CropError::InvalidAspectRatio(ratio));
            }
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(CropError::InvalidDensity(self.density));
        }
        if !(self.handle_radius.is_finite() && self.handle_radius >= 0.0) {
            return Err(CropError::InvalidHandleRadius(self.handle_radius));
        }
        if !(self.touch_padding.is_finite() && self.touch_padding >= 0.0) {
            return Err(CropError::InvalidTouchPadding(self.touch_padding));
        }
        Ok(())
    }
}
