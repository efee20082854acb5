//! Cropkit WASM - WebAssembly bindings for Cropkit
//!
//! This crate exposes the cropkit-core crop controller to JavaScript/TypeScript
//! applications that render the crop overlay on an HTML canvas.
//!
//! # Module Structure
//!
//! - `controller` - The crop controller and its plain state view
//! - `types` - WASM-compatible wrapper type for RGB image data
//! - `logger` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropController, JsImage } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = new JsImage(width, height, rgbBytes);
//! const controller = new JsCropController(image, { gridlines: 'always' });
//! ```

use wasm_bindgen::prelude::*;

mod controller;
mod logger;
mod types;

pub use controller::{CropStateView, JsCropController};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init_logging(log::LevelFilter::Info);
}

/// Change the console log level ("error", "warn", "info", "debug", "trace" or "off").
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init_logging(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Smallest crop rect side, in canvas units.
#[wasm_bindgen]
pub fn min_crop_size() -> f32 {
    cropkit_core::MIN_CROP_SIZE
}
