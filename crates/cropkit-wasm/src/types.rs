//! WASM-compatible wrapper types for image data.
//!
//! Images cross the JS boundary as tightly packed RGB bytes and are held as
//! `DynamicImage` on the Rust side.

use cropkit_core::CropError;
use image::{DynamicImage, RgbImage};
use wasm_bindgen::prelude::*;

/// An RGB image wrapper for JavaScript.
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a new JsImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array. This copies the buffer.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsImage {
    pub(crate) fn from_dynamic(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        Self {
            width: rgb.width(),
            height: rgb.height(),
            pixels: rgb.into_raw(),
        }
    }

    /// Copy into a `DynamicImage`, checking the buffer matches the size.
    pub(crate) fn to_dynamic(&self) -> Result<DynamicImage, CropError> {
        let expected = self.width as usize * self.height as usize * 3;
        if self.pixels.len() != expected {
            return Err(CropError::PixelBufferMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }

        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .map(DynamicImage::ImageRgb8)
            .ok_or(CropError::PixelBufferMismatch {
                expected,
                actual: self.pixels.len(),
            })
    }
}
