//! Controller binding one state manager to one image and one configuration.
//!
//! The rendering layer talks to the crop core only through this type: it
//! forwards gesture and layout events as [`CropAction`]s and observes the
//! resulting snapshots through a [`StateStream`].
//!
//! # Example
//!
//! ```ignore
//! let mut controller = CropController::new(image, CropOptions::default())?;
//! let mut stream = controller.state();
//!
//! controller.on_state_change(CropAction::CanvasSizeChanged(Size::new(800.0, 600.0)));
//! controller.on_state_change(CropAction::DragStart(Offset::new(400.0, 300.0)));
//! controller.on_state_change(CropAction::DragBy(Offset::new(12.0, -4.0)));
//! controller.on_state_change(CropAction::DragEnd);
//!
//! let snapshot = stream.latest();
//! let cropped = controller.crop();
//! ```

use log::debug;
use tokio::sync::watch;

use crate::bitmap::Bitmap;
use crate::error::CropError;
use crate::geometry::{Offset, Size};
use crate::manager::CropStateManager;
use crate::options::CropOptions;
use crate::state::CropState;

/// Input events delivered by the gesture and layout plumbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropAction {
    DragStart(Offset),
    DragBy(Offset),
    DragEnd,
    CanvasSizeChanged(Size),
}

/// Latest-value subscription to crop state snapshots.
pub struct StateStream<B> {
    receiver: watch::Receiver<CropState<B>>,
}

impl<B: Clone> StateStream<B> {
    /// The newest snapshot, marking it as seen.
    pub fn latest(&mut self) -> CropState<B> {
        self.receiver.borrow_and_update().clone()
    }

    /// The newest snapshot without marking it as seen.
    pub fn peek(&self) -> CropState<B> {
        self.receiver.borrow().clone()
    }

    /// True when a snapshot newer than the last `latest()` is available.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next snapshot. Returns false once the controller is gone.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

pub struct CropController<B: Bitmap> {
    manager: CropStateManager<B>,
}

impl<B: Bitmap> CropController<B> {
    /// Validate `options` and `bitmap`, then build the controller.
    ///
    /// # Errors
    ///
    /// Returns `CropError::EmptyImage` for a bitmap with a zero dimension and
    /// the matching variant for any invalid option.
    pub fn new(bitmap: B, options: CropOptions) -> Result<Self, CropError> {
        let (width, height) = (bitmap.width(), bitmap.height());
        let shape = options.shape;
        let manager = CropStateManager::new(bitmap, options)?;

        debug!(
            "new crop controller for {}x{} image, shape {:?}",
            width, height, shape
        );
        Ok(Self { manager })
    }

    pub fn options(&self) -> &CropOptions {
        self.manager.options()
    }

    /// Subscribe to state snapshots, starting from the current one.
    pub fn state(&self) -> StateStream<B> {
        StateStream {
            receiver: self.manager.subscribe(),
        }
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> CropState<B> {
        self.manager.state()
    }

    pub fn on_state_change(&mut self, action: CropAction) {
        match action {
            CropAction::DragStart(point) => self.manager.on_drag_start(point),
            CropAction::DragBy(delta) => self.manager.on_drag(delta),
            CropAction::DragEnd => self.manager.on_drag_end(),
            CropAction::CanvasSizeChanged(size) => self.manager.update_canvas_size(size),
        }
    }

    /// The selected region of the working image, in source pixels.
    pub fn crop(&self) -> B {
        self.manager.crop()
    }

    /// The selected region of another bitmap of the same content, e.g. a
    /// full-resolution original behind a downscaled working copy.
    pub fn crop_target(&self, target: &B) -> B {
        self.manager.crop_target(target)
    }

    pub fn rotate_clockwise(&mut self) {
        self.manager.rotate_clockwise();
    }

    pub fn rotate_anti_clockwise(&mut self) {
        self.manager.rotate_anti_clockwise();
    }

    pub fn flip_horizontally(&mut self) {
        self.manager.flip_horizontally();
    }

    pub fn flip_vertically(&mut self) {
        self.manager.flip_vertically();
    }
}
