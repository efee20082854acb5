//! WASM bindings for the crop controller.
//!
//! JS owns the canvas: it reports the canvas size and pointer gestures,
//! and redraws from the state view handed to its subscriber.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const controller = new JsCropController(image, { shape: { kind: 'square' } });
//! controller.subscribe((state) => draw(state));
//! controller.canvas_resized(canvas.width, canvas.height);
//!
//! canvas.onpointerdown = (e) => controller.drag_start(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => controller.drag_by(e.movementX, e.movementY);
//! canvas.onpointerup = () => controller.drag_end();
//!
//! const cropped = controller.crop();
//! ```

use cropkit_core::{
    draws_ellipse, grid_lines, CropAction, CropController, CropOptions, CropState, LineSegment,
    Offset, Rect, Size, StateStream,
};
use image::DynamicImage;
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::JsImage;

/// Plain snapshot of the crop state handed to JS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropStateView {
    pub ready: bool,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub image_rect: Option<Rect>,
    pub crop_rect: Option<Rect>,
    /// Handle circles to draw, edges included only without a ratio.
    pub handles: Vec<Rect>,
    pub aspect_ratio: Option<f32>,
    pub is_dragging: bool,
    pub gridlines_active: bool,
    /// Straight gridlines, empty unless `gridlines_active`.
    pub gridlines: Vec<LineSegment>,
    pub draw_ellipse: bool,
}

impl CropStateView {
    pub(crate) fn new(state: &CropState<DynamicImage>, options: &CropOptions) -> Self {
        let crop_rect = state.crop_rect();
        let gridlines = match crop_rect {
            Some(rect) if state.gridlines_active => grid_lines(rect, options.gridline_style),
            _ => Vec::new(),
        };

        Self {
            ready: state.is_ready(),
            canvas_width: state.canvas_size().width,
            canvas_height: state.canvas_size().height,
            image_rect: state.image_rect(),
            crop_rect,
            handles: state
                .handles()
                .map(|h| h.visible(options.shows_edge_handles()))
                .unwrap_or_default(),
            aspect_ratio: state.aspect_ratio,
            is_dragging: state.is_dragging,
            gridlines_active: state.gridlines_active,
            gridlines,
            draw_ellipse: draws_ellipse(options.gridline_style),
        }
    }
}

/// Crop controller wrapper for JavaScript.
#[wasm_bindgen]
pub struct JsCropController {
    inner: CropController<DynamicImage>,
    stream: StateStream<DynamicImage>,
    subscriber: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl JsCropController {
    /// Create a controller for `image`.
    ///
    /// `options` is a plain object matching `CropOptions`; missing fields
    /// take their defaults and `undefined` means all defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsImage, options: JsValue) -> Result<JsCropController, JsValue> {
        let options: CropOptions = if options.is_undefined() || options.is_null() {
            CropOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let bitmap = image
            .to_dynamic()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Self::from_parts(bitmap, options).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Register `callback` to receive the state view after every change.
    /// It is called once right away with the current view. Replaces any
    /// previous subscriber.
    pub fn subscribe(&mut self, callback: js_sys::Function) {
        let state = self.stream.latest();
        self.push(&callback, &state);
        self.subscriber = Some(callback);
    }

    pub fn unsubscribe(&mut self) {
        self.subscriber = None;
    }

    /// Current state view as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.view()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn canvas_resized(&mut self, width: f32, height: f32) {
        self.dispatch(CropAction::CanvasSizeChanged(Size::new(width, height)));
    }

    pub fn drag_start(&mut self, x: f32, y: f32) {
        self.dispatch(CropAction::DragStart(Offset::new(x, y)));
    }

    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        self.dispatch(CropAction::DragBy(Offset::new(dx, dy)));
    }

    pub fn drag_end(&mut self) {
        self.dispatch(CropAction::DragEnd);
    }

    pub fn rotate_clockwise(&mut self) {
        self.inner.rotate_clockwise();
        self.notify();
    }

    pub fn rotate_anti_clockwise(&mut self) {
        self.inner.rotate_anti_clockwise();
        self.notify();
    }

    pub fn flip_horizontally(&mut self) {
        self.inner.flip_horizontally();
        self.notify();
    }

    pub fn flip_vertically(&mut self) {
        self.inner.flip_vertically();
        self.notify();
    }

    /// The working image resampled to its on-canvas size, once laid out.
    pub fn display_image(&self) -> Option<JsImage> {
        self.inner
            .snapshot()
            .display_image()
            .map(|img| JsImage::from_dynamic(img))
    }

    /// Crop the working image to the current selection.
    pub fn crop(&self) -> JsImage {
        JsImage::from_dynamic(&self.inner.crop())
    }

    /// Crop `target` (e.g. the full-resolution original) to the current
    /// selection, scaled to its own dimensions.
    pub fn crop_target(&self, target: &JsImage) -> Result<JsImage, JsValue> {
        let target = target
            .to_dynamic()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsImage::from_dynamic(&self.inner.crop_target(&target)))
    }
}

impl JsCropController {
    pub(crate) fn from_parts(
        bitmap: DynamicImage,
        options: CropOptions,
    ) -> Result<Self, cropkit_core::CropError> {
        let inner = CropController::new(bitmap, options)?;
        let stream = inner.state();
        Ok(Self {
            inner,
            stream,
            subscriber: None,
        })
    }

    pub(crate) fn view(&self) -> CropStateView {
        CropStateView::new(&self.stream.peek(), self.inner.options())
    }

    fn dispatch(&mut self, action: CropAction) {
        self.inner.on_state_change(action);
        self.notify();
    }

    /// Hand the newest state to the subscriber, if anything changed.
    fn notify(&mut self) {
        if !self.stream.has_changed() {
            return;
        }
        let state = self.stream.latest();

        let Some(callback) = &self.subscriber else {
            return;
        };
        self.push(callback, &state);
    }

    fn push(&self, callback: &js_sys::Function, state: &CropState<DynamicImage>) {
        let view = CropStateView::new(state, self.inner.options());
        let value = match serde_wasm_bindgen::to_value(&view) {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to serialize crop state: {}", e);
                return;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &value) {
            warn!("state subscriber failed: {:?}", err);
        }
    }
}

/// Tests for the controller bindings.
///
/// These run on native targets and avoid anything that creates a `JsValue`.
#[cfg(test)]
mod tests {
    use super::*;
    use cropkit_core::{CropShape, GridlineStyle, GridlinesVisibility};

    fn controller(options: CropOptions) -> JsCropController {
        JsCropController::from_parts(DynamicImage::new_rgb8(1000, 1000), options).unwrap()
    }

    #[test]
    fn test_view_before_layout() {
        let c = controller(CropOptions::default());
        let view = c.view();
        assert!(!view.ready);
        assert_eq!(view.crop_rect, None);
        assert!(view.handles.is_empty());
        assert!(view.gridlines.is_empty());
    }

    #[test]
    fn test_view_after_resize_has_handles() {
        let mut c = controller(CropOptions::default());
        c.canvas_resized(500.0, 500.0);

        let view = c.view();
        assert!(view.ready);
        assert_eq!(view.crop_rect, Some(Rect::new(0.0, 0.0, 500.0, 500.0)));
        assert_eq!(view.handles.len(), 8);
    }

    #[test]
    fn test_constrained_view_shows_corners_only() {
        let mut c = controller(CropOptions::default().with_shape(CropShape::Square));
        c.canvas_resized(500.0, 500.0);
        assert_eq!(c.view().handles.len(), 4);
        assert_eq!(c.view().aspect_ratio, Some(1.0));
    }

    #[test]
    fn test_gridlines_follow_drag() {
        let mut options = CropOptions::default().with_gridlines(GridlinesVisibility::OnTouch);
        options.gridline_style = GridlineStyle::Crosshair;
        let mut c = controller(options);
        c.canvas_resized(500.0, 500.0);

        c.drag_start(250.0, 250.0);
        let view = c.view();
        assert!(view.gridlines_active);
        assert_eq!(view.gridlines.len(), 2);
        assert!(!view.draw_ellipse);

        c.drag_end();
        assert!(c.view().gridlines.is_empty());
    }

    #[test]
    fn test_crop_after_rotation() {
        let mut c = JsCropController::from_parts(
            DynamicImage::new_rgb8(200, 100),
            CropOptions::default(),
        )
        .unwrap();
        c.rotate_clockwise();

        let cropped = c.crop();
        assert_eq!(cropped.width(), 100);
        assert_eq!(cropped.height(), 200);
    }

    #[test]
    fn test_crop_target_scales_selection() {
        let mut c = controller(CropOptions::default());
        c.canvas_resized(1000.0, 1000.0);
        c.drag_start(0.0, 0.0);
        c.drag_by(500.0, 500.0);
        c.drag_end();

        let target = JsImage::new(2000, 2000, vec![0u8; 2000 * 2000 * 3]);
        let cropped = c.crop_target(&target).ok().unwrap();
        assert_eq!((cropped.width(), cropped.height()), (1000, 1000));
    }

    #[test]
    fn test_non_finite_drag_is_ignored() {
        let mut c = controller(CropOptions::default());
        c.canvas_resized(1000.0, 1000.0);
        c.drag_start(0.0, 0.0);
        c.drag_by(f32::NAN, 10.0);
        c.drag_by(5.0, f32::INFINITY);
        c.drag_end();
        assert_eq!(c.view().crop_rect, Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)));

        c.canvas_resized(f32::INFINITY, 400.0);
        assert_eq!((c.view().canvas_width, c.view().canvas_height), (1000.0, 1000.0));
    }

    #[test]
    fn test_from_parts_rejects_empty_image() {
        let result = JsCropController::from_parts(DynamicImage::new_rgb8(0, 0), CropOptions::default());
        assert!(result.is_err());
    }
}

/// WASM-specific tests that require JsValue.
///
/// Run these with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn image() -> JsImage {
        JsImage::new(400, 300, vec![0u8; 400 * 300 * 3])
    }

    #[wasm_bindgen_test]
    fn test_new_with_default_options() {
        let result = JsCropController::new(&image(), JsValue::UNDEFINED);
        assert!(result.is_ok());
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_bad_buffer() {
        let bad = JsImage::new(400, 300, vec![0u8; 12]);
        assert!(JsCropController::new(&bad, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_late_subscriber_receives_current_view() {
        let mut controller = JsCropController::new(&image(), JsValue::UNDEFINED).unwrap();
        controller.canvas_resized(400.0, 300.0);

        let callback = js_sys::Function::new_with_args(
            "state",
            "globalThis.__cropkitLastReady = state.ready;",
        );
        controller.subscribe(callback);

        let seen = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("__cropkitLastReady"))
            .unwrap();
        assert_eq!(seen.as_bool(), Some(true));
    }

    #[wasm_bindgen_test]
    fn test_state_serializes() {
        let mut controller = JsCropController::new(&image(), JsValue::NULL).unwrap();
        controller.canvas_resized(400.0, 300.0);
        assert!(controller.state().unwrap().is_object());
    }
}
