//! Immutable crop state snapshots.
//!
//! A new [`CropState`] replaces the previous one on every change. Bitmaps are
//! shared behind `Arc` so publishing a snapshot never copies pixels.

use std::sync::Arc;

use crate::geometry::{Rect, Size};
use crate::handles::{DragHandle, Handles};

/// Gesture interpretation, locked in at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// No gesture, or a gesture that started outside the crop rect.
    #[default]
    None,
    /// Translating the whole crop rect.
    Move,
    /// Resizing through one handle.
    Handle(DragHandle),
}

/// Geometry computed once a non-zero canvas size is known.
#[derive(Debug, Clone)]
pub struct CropLayout<B> {
    pub canvas_size: Size,
    /// Where the (letterboxed) image is painted on the canvas.
    pub image_rect: Rect,
    pub crop_rect: Rect,
    pub handles: Handles,
    /// The working bitmap resampled to `image_rect` size.
    pub display_image: Arc<B>,
}

impl<B> CropLayout<B> {
    /// Same layout with a new crop rect and handles derived from it.
    pub fn with_crop_rect(&self, crop_rect: Rect, handle_radius: f32) -> Self {
        Self {
            canvas_size: self.canvas_size,
            image_rect: self.image_rect,
            crop_rect,
            handles: Handles::new(crop_rect, handle_radius),
            display_image: Arc::clone(&self.display_image),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Layout<B> {
    /// Waiting for the first non-zero canvas size.
    Uninitialized,
    Ready(CropLayout<B>),
}

/// One published crop state.
#[derive(Debug, Clone)]
pub struct CropState<B> {
    /// The working bitmap, after any rotation or flip.
    pub source: Arc<B>,
    pub layout: Layout<B>,
    /// `width / height` constraint, `None` for free-form.
    pub aspect_ratio: Option<f32>,
    pub is_dragging: bool,
    pub gridlines_active: bool,
}

impl<B> CropState<B> {
    pub fn new(source: Arc<B>, aspect_ratio: Option<f32>, gridlines_active: bool) -> Self {
        Self {
            source,
            layout: Layout::Uninitialized,
            aspect_ratio,
            is_dragging: false,
            gridlines_active,
        }
    }

    pub fn layout(&self) -> Option<&CropLayout<B>> {
        match &self.layout {
            Layout::Ready(layout) => Some(layout),
            Layout::Uninitialized => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.layout, Layout::Ready(_))
    }

    /// Last known canvas size, zero before the first layout.
    pub fn canvas_size(&self) -> Size {
        self.layout().map_or(Size::ZERO, |l| l.canvas_size)
    }

    pub fn image_rect(&self) -> Option<Rect> {
        self.layout().map(|l| l.image_rect)
    }

    pub fn crop_rect(&self) -> Option<Rect> {
        self.layout().map(|l| l.crop_rect)
    }

    pub fn handles(&self) -> Option<Handles> {
        self.layout().map(|l| l.handles)
    }

    pub fn display_image(&self) -> Option<&Arc<B>> {
        self.layout().map(|l| &l.display_image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_uninitialized() {
        let state = CropState::new(Arc::new(()), Some(1.0), true);
        assert!(!state.is_ready());
        assert_eq!(state.canvas_size(), Size::ZERO);
        assert_eq!(state.crop_rect(), None);
        assert_eq!(state.handles(), None);
        assert!(state.gridlines_active);
        assert!(!state.is_dragging);
    }

    #[test]
    fn test_with_crop_rect_rederives_handles() {
        let layout = CropLayout {
            canvas_size: Size::new(100.0, 100.0),
            image_rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            crop_rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            handles: Handles::new(Rect::new(0.0, 0.0, 100.0, 100.0), 4.0),
            display_image: Arc::new(()),
        };
        let crop = Rect::new(10.0, 10.0, 60.0, 60.0);
        let next = layout.with_crop_rect(crop, 4.0);

        assert_eq!(next.crop_rect, crop);
        assert_eq!(next.handles, Handles::new(crop, 4.0));
        assert_eq!(next.image_rect, layout.image_rect);
    }
}
