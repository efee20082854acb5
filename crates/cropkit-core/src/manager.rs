//! The crop state machine.
//!
//! [`CropStateManager`] owns the current [`CropState`] and is its only
//! writer. Every operation runs to completion synchronously and publishes a
//! whole new snapshot through a single-slot `watch` channel, so subscribers
//! always see the latest state and never a backlog.
//!
//! # Drag Lifecycle
//!
//! ```text
//! Idle --drag start on handle--> Handle(h) --drag end--> Idle
//! Idle --drag start in rect----> Move      --drag end--> Idle
//! Idle --drag start elsewhere--> Idle (rest of gesture ignored)
//! ```

use std::sync::Arc;

use log::{debug, trace};
use tokio::sync::watch;

use crate::bitmap::Bitmap;
use crate::drag;
use crate::error::CropError;
use crate::geometry::{
    calculate_scaled_size, centered_rect, largest_rect_with_ratio, Offset, Size,
};
use crate::handles::{DragHandle, Handles};
use crate::options::{CropOptions, GridlinesVisibility};
use crate::state::{CropLayout, CropState, DragMode, Layout};
use crate::transform::{apply_crop, ImageTransform};

/// Smallest crop rect side, in canvas units.
pub const MIN_CROP_SIZE: f32 = 250.0;

pub struct CropStateManager<B: Bitmap> {
    options: CropOptions,
    state: watch::Sender<CropState<B>>,
    drag_mode: DragMode,
}

impl<B: Bitmap> CropStateManager<B> {
    /// Start in the uninitialized layout; nothing is laid out until the
    /// first non-zero canvas size arrives.
    ///
    /// # Errors
    ///
    /// Returns `CropError::EmptyImage` for a bitmap with a zero dimension and
    /// the matching variant for any invalid option.
    pub fn new(bitmap: B, options: CropOptions) -> Result<Self, CropError> {
        options.validate()?;
        if bitmap.is_empty() {
            return Err(CropError::EmptyImage {
                width: bitmap.width(),
                height: bitmap.height(),
            });
        }

        let initial = initial_state(&options, Arc::new(bitmap));
        let (state, _) = watch::channel(initial);
        Ok(Self {
            options,
            state,
            drag_mode: DragMode::None,
        })
    }

    pub fn options(&self) -> &CropOptions {
        &self.options
    }

    /// Copy of the current snapshot.
    pub fn state(&self) -> CropState<B> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CropState<B>> {
        self.state.subscribe()
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    /// Lay the image out on a canvas of `canvas_size`, resetting the crop
    /// rect. A zero size is ignored.
    pub fn update_canvas_size(&mut self, canvas_size: Size) {
        if canvas_size.is_empty() {
            trace!("ignoring empty canvas size {:?}", canvas_size);
            return;
        }

        let current = self.state();
        let layout = self.lay_out(canvas_size, &current.source, current.aspect_ratio);
        debug!(
            "canvas {}x{}: image rect {:?}, crop rect {:?}",
            canvas_size.width, canvas_size.height, layout.image_rect, layout.crop_rect
        );

        self.publish(CropState {
            layout: Layout::Ready(layout),
            ..current
        });
    }

    pub fn on_drag_start(&mut self, point: Offset) {
        let current = self.state();

        self.drag_mode = match current.layout() {
            Some(layout) => {
                let handle = layout.handles.hit_test(
                    point,
                    self.options.touch_padding_px(),
                    self.options.shows_edge_handles(),
                );
                match handle {
                    Some(handle) => DragMode::Handle(handle),
                    None if layout.crop_rect.contains(point) => DragMode::Move,
                    None => DragMode::None,
                }
            }
            None => DragMode::None,
        };
        debug!("drag start at ({}, {}): {:?}", point.x, point.y, self.drag_mode);

        let active = self.drag_mode != DragMode::None;
        let gridlines_active = match self.options.gridlines {
            GridlinesVisibility::OnTouch => active,
            _ => current.gridlines_active,
        };

        self.publish(CropState {
            is_dragging: active,
            gridlines_active,
            ..current
        });
    }

    /// Apply one drag increment. Non-finite deltas are dropped.
    pub fn on_drag(&mut self, delta: Offset) {
        if !delta.is_finite() {
            trace!("ignoring non-finite drag delta {:?}", delta);
            return;
        }
        match self.drag_mode {
            DragMode::None => {}
            DragMode::Move => self.move_crop_rect(delta),
            DragMode::Handle(handle) => self.drag_handle(handle, delta),
        }
    }

    pub fn on_drag_end(&mut self) {
        debug!("drag end: {:?}", self.drag_mode);
        self.drag_mode = DragMode::None;

        let current = self.state();
        let gridlines_active = match self.options.gridlines {
            GridlinesVisibility::Always => current.gridlines_active,
            _ => false,
        };

        self.publish(CropState {
            is_dragging: false,
            gridlines_active,
            ..current
        });
    }

    pub fn rotate_clockwise(&mut self) {
        self.transform_bitmap(ImageTransform::RotateClockwise);
    }

    pub fn rotate_anti_clockwise(&mut self) {
        self.transform_bitmap(ImageTransform::RotateAntiClockwise);
    }

    pub fn flip_horizontally(&mut self) {
        self.transform_bitmap(ImageTransform::FlipHorizontal);
    }

    pub fn flip_vertically(&mut self) {
        self.transform_bitmap(ImageTransform::FlipVertical);
    }

    /// Extract the selected region of the working bitmap.
    ///
    /// Before the first layout the whole working bitmap is returned.
    pub fn crop(&self) -> B {
        let state = self.state.borrow();
        self.crop_bitmap(&state, state.source.as_ref())
    }

    /// Extract the selected region of `target`, scaling the selection to the
    /// target's own dimensions.
    pub fn crop_target(&self, target: &B) -> B {
        let state = self.state.borrow();
        self.crop_bitmap(&state, target)
    }

    fn crop_bitmap(&self, state: &CropState<B>, bitmap: &B) -> B {
        match state.layout() {
            Some(layout) => apply_crop(bitmap, layout.crop_rect, layout.image_rect),
            None => {
                debug!("crop before layout, returning the full image");
                bitmap.clone()
            }
        }
    }

    fn move_crop_rect(&mut self, delta: Offset) {
        let current = self.state();
        let Some(layout) = current.layout() else {
            return;
        };

        let crop_rect = drag::move_rect(delta, layout.image_rect, layout.crop_rect);
        trace!("move by ({}, {}): {:?}", delta.x, delta.y, crop_rect);

        let layout = layout.with_crop_rect(crop_rect, self.options.handle_radius_px());
        self.publish(CropState {
            layout: Layout::Ready(layout),
            ..current
        });
    }

    fn drag_handle(&mut self, handle: DragHandle, delta: Offset) {
        let current = self.state();
        let Some(layout) = current.layout() else {
            return;
        };

        let adjusted = match current.aspect_ratio {
            Some(ratio) => drag::shape_adjusted_delta(handle, delta, ratio),
            None => delta,
        };

        let resized = drag::resize(
            handle,
            adjusted,
            layout.image_rect,
            layout.crop_rect,
            MIN_CROP_SIZE,
            current.aspect_ratio,
        );
        let Some(crop_rect) = resized else {
            trace!("rejected {:?} drag by ({}, {})", handle, delta.x, delta.y);
            return;
        };
        trace!("{:?} drag by ({}, {}): {:?}", handle, delta.x, delta.y, crop_rect);

        let layout = layout.with_crop_rect(crop_rect, self.options.handle_radius_px());
        self.publish(CropState {
            layout: Layout::Ready(layout),
            ..current
        });
    }

    fn transform_bitmap(&mut self, transform: ImageTransform) {
        let current = self.state();
        let bitmap = current.source.transformed(transform);
        debug!(
            "{:?}: {}x{} -> {}x{}",
            transform,
            current.source.width(),
            current.source.height(),
            bitmap.width(),
            bitmap.height()
        );
        self.reset(bitmap, current.canvas_size());
    }

    /// Start over with `bitmap` as if it had just been loaded, keeping the
    /// canvas size if one is known.
    fn reset(&mut self, bitmap: B, canvas_size: Size) {
        self.drag_mode = DragMode::None;

        let mut state = initial_state(&self.options, Arc::new(bitmap));
        if !canvas_size.is_empty() {
            let layout = self.lay_out(canvas_size, &state.source, state.aspect_ratio);
            state.layout = Layout::Ready(layout);
        }
        self.publish(state);
    }

    fn lay_out(&self, canvas_size: Size, source: &Arc<B>, aspect_ratio: Option<f32>) -> CropLayout<B> {
        let scaled = calculate_scaled_size(
            source.width() as f32,
            source.height() as f32,
            canvas_size.width,
            canvas_size.height,
            self.options.content_scale,
        );
        let image_rect = centered_rect(canvas_size, scaled);

        let crop_rect = match aspect_ratio {
            Some(ratio) => largest_rect_with_ratio(image_rect, ratio),
            None => image_rect,
        };

        let display_image = source.scaled(
            scaled.width.round() as u32,
            scaled.height.round() as u32,
            self.options.preview_filter,
        );

        CropLayout {
            canvas_size,
            image_rect,
            crop_rect,
            handles: Handles::new(crop_rect, self.options.handle_radius_px()),
            display_image: Arc::new(display_image),
        }
    }

    fn publish(&self, state: CropState<B>) {
        self.state.send_replace(state);
    }
}

fn initial_state<B: Bitmap>(options: &CropOptions, source: Arc<B>) -> CropState<B> {
    let aspect_ratio = options.shape.aspect_ratio(source.width(), source.height());
    let gridlines_active = options.gridlines == GridlinesVisibility::Always;
    CropState::new(source, aspect_ratio, gridlines_active)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
