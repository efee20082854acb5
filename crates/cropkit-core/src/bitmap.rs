//! The image-source contract the crop core works against.
//!
//! The core never decodes files. Hosts hand over an already-decoded bitmap
//! that can report its size, be rescaled, be rotated or flipped, and give up
//! a sub-region. An implementation for [`image::DynamicImage`] is provided.

use std::fmt;

use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::transform::{ImageTransform, PixelRect};

/// Filter used when rescaling a bitmap for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleFilter {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl ScaleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ScaleFilter::Nearest => image::imageops::FilterType::Nearest,
            ScaleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ScaleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An opaque, already-decoded bitmap.
///
/// Every operation returns a new bitmap; the receiver is left untouched.
pub trait Bitmap: Clone + fmt::Debug + Send + Sync + 'static {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resample to exactly `width x height`.
    fn scaled(&self, width: u32, height: u32, filter: ScaleFilter) -> Self;

    /// Rotate by a quarter turn or mirror along an axis.
    fn transformed(&self, transform: ImageTransform) -> Self;

    /// Copy out a region. `rect` must lie inside the bitmap.
    fn sub_image(&self, rect: PixelRect) -> Self;

    fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl Bitmap for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn scaled(&self, width: u32, height: u32, filter: ScaleFilter) -> Self {
        // Fast path: if dimensions match, just clone
        if GenericImageView::dimensions(self) == (width, height) {
            return self.clone();
        }
        self.resize_exact(width.max(1), height.max(1), filter.to_image_filter())
    }

    fn transformed(&self, transform: ImageTransform) -> Self {
        match transform {
            ImageTransform::RotateClockwise => self.rotate90(),
            ImageTransform::RotateAntiClockwise => self.rotate270(),
            ImageTransform::FlipHorizontal => self.fliph(),
            ImageTransform::FlipVertical => self.flipv(),
        }
    }

    fn sub_image(&self, rect: PixelRect) -> Self {
        self.crop_imm(rect.x, rect.y, rect.width, rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Create a test image where each pixel encodes its position.
    fn test_image(width: u32, height: u32) -> DynamicImage {
        let buffer = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]));
        DynamicImage::ImageRgb8(buffer)
    }

    fn pixel(image: &DynamicImage, x: u32, y: u32) -> [u8; 3] {
        image.to_rgb8().get_pixel(x, y).0
    }

    #[test]
    fn test_filter_conversion() {
        assert!(matches!(
            ScaleFilter::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            ScaleFilter::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            ScaleFilter::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_dimensions() {
        let img = test_image(30, 20);
        assert_eq!(Bitmap::width(&img), 30);
        assert_eq!(Bitmap::height(&img), 20);
        assert_eq!(Bitmap::size(&img), Size::new(30.0, 20.0));
        assert!(!Bitmap::is_empty(&img));
    }

    #[test]
    fn test_scaled() {
        let img = test_image(40, 20);
        let scaled = img.scaled(20, 10, ScaleFilter::Nearest);
        assert_eq!(Bitmap::width(&scaled), 20);
        assert_eq!(Bitmap::height(&scaled), 10);

        let same = img.scaled(40, 20, ScaleFilter::Bilinear);
        assert_eq!(same.as_bytes(), img.as_bytes());
    }

    #[test]
    fn test_rotate_clockwise_swaps_dimensions() {
        let img = test_image(30, 20);
        let rotated = img.transformed(ImageTransform::RotateClockwise);
        assert_eq!(Bitmap::width(&rotated), 20);
        assert_eq!(Bitmap::height(&rotated), 30);

        // Top-left of the source ends up top-right after a clockwise turn
        assert_eq!(pixel(&rotated, 19, 0), [0, 0, 0]);
        // Bottom-left of the source ends up top-left
        assert_eq!(pixel(&rotated, 0, 0), [0, 19, 0]);
    }

    #[test]
    fn test_rotate_anti_clockwise() {
        let img = test_image(30, 20);
        let rotated = img.transformed(ImageTransform::RotateAntiClockwise);
        assert_eq!(Bitmap::width(&rotated), 20);
        assert_eq!(Bitmap::height(&rotated), 30);
        // Top-right of the source ends up top-left
        assert_eq!(pixel(&rotated, 0, 0), [29, 0, 0]);
    }

    #[test]
    fn test_flips_keep_dimensions() {
        let img = test_image(30, 20);

        let h = img.transformed(ImageTransform::FlipHorizontal);
        assert_eq!((Bitmap::width(&h), Bitmap::height(&h)), (30, 20));
        assert_eq!(pixel(&h, 0, 0), [29, 0, 0]);

        let v = img.transformed(ImageTransform::FlipVertical);
        assert_eq!((Bitmap::width(&v), Bitmap::height(&v)), (30, 20));
        assert_eq!(pixel(&v, 0, 0), [0, 19, 0]);
    }

    #[test]
    fn test_sub_image() {
        let img = test_image(30, 20);
        let sub = img.sub_image(PixelRect::new(5, 6, 10, 4));
        assert_eq!(Bitmap::width(&sub), 10);
        assert_eq!(Bitmap::height(&sub), 4);
        assert_eq!(pixel(&sub, 0, 0), [5, 6, 0]);
    }
}
