//! Drag resolution: turning a pointer delta into a new crop rect.
//!
//! Every function here is pure. A `None` result means the increment cannot
//! produce a valid rect and must be dropped, keeping the previous rect.
//!
//! # Constrained Resize
//!
//! With an aspect ratio in effect, the raw delta is first reduced to a
//! ratio-consistent delta by [`shape_adjusted_delta`], then applied by
//! [`resize`] from the corner opposite the dragged one. Bounds and minimum
//! size are enforced on the width, the height follows from the ratio.

use crate::geometry::{Offset, Rect};
use crate::handles::DragHandle;

/// Reduce a raw drag delta to one that keeps `aspect_ratio` for a corner drag.
///
/// Two single-axis candidates are built: one driven by `dx` (with
/// `dy = |dx| / ratio`) and one driven by `dy` (with `dx = |dy| * ratio`).
/// The candidate with the smaller movement wins. The sign shrinks the rect
/// unless the drag points strictly outwards from the corner.
///
/// Edge handles have no ratio-preserving motion and yield [`Offset::ZERO`].
pub fn shape_adjusted_delta(handle: DragHandle, delta: Offset, aspect_ratio: f32) -> Offset {
    let (dx, dy) = (delta.x, delta.y);

    let x_constraint = dx.abs();
    let x_constraint_delta_y = x_constraint / aspect_ratio;
    let y_constraint = dy.abs();
    let y_constraint_delta_x = y_constraint * aspect_ratio;

    let x_driven =
        x_constraint.min(x_constraint_delta_y) <= y_constraint.min(y_constraint_delta_x);
    let (mx, my) = if x_driven {
        (x_constraint, x_constraint_delta_y)
    } else {
        (y_constraint_delta_x, y_constraint)
    };

    // Outward drag grows the rect, anything else shrinks it
    let outward = match handle {
        DragHandle::TopLeft => dx < 0.0 && dy < 0.0,
        DragHandle::TopRight => dx > 0.0 && dy < 0.0,
        DragHandle::BottomLeft => dx < 0.0 && dy > 0.0,
        DragHandle::BottomRight => dx > 0.0 && dy > 0.0,
        _ => return Offset::ZERO,
    };
    let sign = if outward { -1.0 } else { 1.0 };

    // Per-axis direction of a shrinking move for this corner
    let (x_dir, y_dir) = match handle {
        DragHandle::TopLeft => (1.0, 1.0),
        DragHandle::TopRight => (-1.0, 1.0),
        DragHandle::BottomLeft => (1.0, -1.0),
        _ => (-1.0, -1.0),
    };

    Offset::new(x_dir * sign * mx, y_dir * sign * my)
}

/// Apply a drag delta to the edges owned by `handle`.
///
/// Without a ratio each edge moves independently and is clamped to the
/// image rect and the minimum size. With a ratio only corner handles are
/// accepted and `delta` is expected to come from [`shape_adjusted_delta`].
pub fn resize(
    handle: DragHandle,
    delta: Offset,
    image_rect: Rect,
    crop_rect: Rect,
    min_crop_size: f32,
    aspect_ratio: Option<f32>,
) -> Option<Rect> {
    match aspect_ratio {
        Some(ratio) => resize_with_ratio(handle, delta, image_rect, crop_rect, min_crop_size, ratio),
        None => resize_free_form(handle, delta, image_rect, crop_rect, min_crop_size),
    }
}

fn resize_free_form(
    handle: DragHandle,
    delta: Offset,
    image_rect: Rect,
    crop_rect: Rect,
    min_crop_size: f32,
) -> Option<Rect> {
    let mut rect = crop_rect;

    if handle.moves_left() {
        rect.left = clamp_edge(
            crop_rect.left,
            crop_rect.left + delta.x,
            image_rect.left,
            crop_rect.right - min_crop_size,
        );
    }
    if handle.moves_right() {
        rect.right = clamp_edge(
            crop_rect.right,
            crop_rect.right + delta.x,
            crop_rect.left + min_crop_size,
            image_rect.right,
        );
    }
    if handle.moves_top() {
        rect.top = clamp_edge(
            crop_rect.top,
            crop_rect.top + delta.y,
            image_rect.top,
            crop_rect.bottom - min_crop_size,
        );
    }
    if handle.moves_bottom() {
        rect.bottom = clamp_edge(
            crop_rect.bottom,
            crop_rect.bottom + delta.y,
            crop_rect.top + min_crop_size,
            image_rect.bottom,
        );
    }

    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    Some(rect)
}

/// Clamp a moved edge into `[min, max]`. When the bounds cross, the image
/// is too small for the minimum size on this axis and the edge stays put.
fn clamp_edge(current: f32, moved: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return current;
    }
    moved.clamp(min, max)
}

fn resize_with_ratio(
    handle: DragHandle,
    delta: Offset,
    image_rect: Rect,
    crop_rect: Rect,
    min_crop_size: f32,
    aspect_ratio: f32,
) -> Option<Rect> {
    if !handle.is_corner() || !(aspect_ratio > 0.0) {
        return None;
    }

    let width = crop_rect.width();
    let requested = if handle.moves_left() {
        width - delta.x
    } else {
        width + delta.x
    };

    // Room available from the anchored (opposite) corner
    let room_x = if handle.moves_left() {
        crop_rect.right - image_rect.left
    } else {
        image_rect.right - crop_rect.left
    };
    let room_y = if handle.moves_top() {
        crop_rect.bottom - image_rect.top
    } else {
        image_rect.bottom - crop_rect.top
    };

    let max_width = room_x.min(room_y * aspect_ratio);
    // A rect already below the minimum (small image) may grow but not shrink
    let min_width = (min_crop_size * aspect_ratio.max(1.0)).min(width);
    if min_width > max_width {
        return None;
    }

    let new_width = requested.clamp(min_width, max_width);
    let new_height = new_width / aspect_ratio;
    if new_width <= 0.0 || new_height <= 0.0 {
        return None;
    }

    let (left, right) = if handle.moves_left() {
        (crop_rect.right - new_width, crop_rect.right)
    } else {
        (crop_rect.left, crop_rect.left + new_width)
    };
    let (top, bottom) = if handle.moves_top() {
        (crop_rect.bottom - new_height, crop_rect.bottom)
    } else {
        (crop_rect.top, crop_rect.top + new_height)
    };

    Some(Rect::new(left, top, right, bottom))
}

/// Translate `crop_rect` by `delta`, clamped per axis to stay inside `image_rect`.
pub fn move_rect(delta: Offset, image_rect: Rect, crop_rect: Rect) -> Rect {
    let width = crop_rect.width();
    let height = crop_rect.height();

    let left = coerce_in(
        crop_rect.left + delta.x,
        image_rect.left,
        image_rect.right - width,
    );
    let top = coerce_in(
        crop_rect.top + delta.y,
        image_rect.top,
        image_rect.bottom - height,
    );

    Rect::new(left, top, left + width, top + height)
}

fn coerce_in(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return min;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f32 = 250.0;

    fn image_rect() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 1000.0)
    }

    #[test]
    fn test_free_form_top_left_moves_two_edges() {
        let crop = Rect::new(100.0, 100.0, 900.0, 900.0);
        let rect = resize(
            DragHandle::TopLeft,
            Offset::new(50.0, -30.0),
            image_rect(),
            crop,
            MIN,
            None,
        )
        .unwrap();
        assert_eq!(rect, Rect::new(150.0, 70.0, 900.0, 900.0));
    }

    #[test]
    fn test_free_form_edge_moves_one_edge() {
        let crop = Rect::new(100.0, 100.0, 900.0, 900.0);
        let rect = resize(
            DragHandle::Right,
            Offset::new(-40.0, 500.0),
            image_rect(),
            crop,
            MIN,
            None,
        )
        .unwrap();
        assert_eq!(rect, Rect::new(100.0, 100.0, 860.0, 900.0));
    }

    #[test]
    fn test_free_form_clamps_to_image_bounds() {
        let crop = Rect::new(100.0, 100.0, 900.0, 900.0);
        let rect = resize(
            DragHandle::BottomRight,
            Offset::new(500.0, 500.0),
            image_rect(),
            crop,
            MIN,
            None,
        )
        .unwrap();
        assert_eq!(rect, Rect::new(100.0, 100.0, 1000.0, 1000.0));
    }

    #[test]
    fn test_free_form_clamps_to_minimum_size_per_edge() {
        let crop = Rect::new(100.0, 100.0, 900.0, 900.0);
        let rect = resize(
            DragHandle::TopLeft,
            Offset::new(1000.0, 10.0),
            image_rect(),
            crop,
            MIN,
            None,
        )
        .unwrap();
        // Left edge hits the minimum width, top edge moves freely
        assert_eq!(rect, Rect::new(650.0, 110.0, 900.0, 900.0));
    }

    #[test]
    fn test_free_form_small_image_keeps_edge() {
        let image = Rect::new(0.0, 0.0, 200.0, 1000.0);
        let crop = Rect::new(0.0, 100.0, 200.0, 900.0);
        let rect = resize(
            DragHandle::Left,
            Offset::new(20.0, 0.0),
            image,
            crop,
            MIN,
            None,
        )
        .unwrap();
        assert_eq!(rect, crop);
    }

    #[test]
    fn test_shape_delta_top_left_outward_grows() {
        // Dragging up-left: both components negative, rect grows
        let delta = shape_adjusted_delta(DragHandle::TopLeft, Offset::new(-10.0, -20.0), 1.0);
        assert_eq!(delta, Offset::new(-10.0, -10.0));
    }

    #[test]
    fn test_shape_delta_top_left_ambiguous_shrinks() {
        // Dragging up-right is ambiguous for the top-left corner: shrink
        let delta = shape_adjusted_delta(DragHandle::TopLeft, Offset::new(10.0, -20.0), 1.0);
        assert_eq!(delta, Offset::new(10.0, 10.0));
    }

    #[test]
    fn test_shape_delta_picks_smaller_candidate() {
        // Ratio 2: x-driven gives (30, 15), y-driven gives (20, 10); the latter is smaller
        let delta = shape_adjusted_delta(DragHandle::BottomRight, Offset::new(30.0, 10.0), 2.0);
        assert_eq!(delta, Offset::new(20.0, 10.0));
    }

    #[test]
    fn test_shape_delta_corner_signs() {
        let d = Offset::new(5.0, 5.0);
        assert_eq!(shape_adjusted_delta(DragHandle::TopRight, d, 1.0), Offset::new(-5.0, 5.0));
        assert_eq!(shape_adjusted_delta(DragHandle::BottomLeft, d, 1.0), Offset::new(5.0, -5.0));
        assert_eq!(shape_adjusted_delta(DragHandle::BottomRight, d, 1.0), Offset::new(5.0, 5.0));

        let outward = Offset::new(5.0, -5.0);
        assert_eq!(
            shape_adjusted_delta(DragHandle::TopRight, outward, 1.0),
            Offset::new(5.0, -5.0)
        );
    }

    #[test]
    fn test_shape_delta_edge_is_zero() {
        let delta = shape_adjusted_delta(DragHandle::Top, Offset::new(5.0, 5.0), 1.0);
        assert_eq!(delta, Offset::ZERO);
    }

    #[test]
    fn test_ratio_resize_keeps_ratio() {
        let crop = Rect::new(100.0, 250.0, 900.0, 650.0); // 800 x 400
        let delta = shape_adjusted_delta(DragHandle::BottomRight, Offset::new(-40.0, -20.0), 2.0);
        let rect = resize(
            DragHandle::BottomRight,
            delta,
            image_rect(),
            crop,
            MIN,
            Some(2.0),
        )
        .unwrap();
        assert_eq!(rect.left, 100.0);
        assert_eq!(rect.top, 250.0);
        assert!((rect.width() / rect.height() - 2.0).abs() < 1e-4);
        assert_eq!(rect.width(), 760.0);
    }

    #[test]
    fn test_ratio_resize_clamps_to_bounds() {
        let crop = Rect::new(100.0, 100.0, 900.0, 900.0);
        let delta = shape_adjusted_delta(DragHandle::TopLeft, Offset::new(-500.0, -500.0), 1.0);
        let rect = resize(DragHandle::TopLeft, delta, image_rect(), crop, MIN, Some(1.0)).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 900.0, 900.0));
    }

    #[test]
    fn test_ratio_resize_respects_minimum_on_both_axes() {
        let crop = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let delta = shape_adjusted_delta(DragHandle::BottomRight, Offset::new(-900.0, -450.0), 2.0);
        let rect = resize(
            DragHandle::BottomRight,
            delta,
            image_rect(),
            crop,
            MIN,
            Some(2.0),
        )
        .unwrap();
        assert_eq!(rect.width(), 500.0);
        assert_eq!(rect.height(), 250.0);
    }

    #[test]
    fn test_ratio_resize_rejects_edge_handles() {
        let crop = Rect::new(100.0, 100.0, 900.0, 900.0);
        let result = resize(DragHandle::Left, Offset::ZERO, image_rect(), crop, MIN, Some(1.0));
        assert!(result.is_none());
    }

    #[test]
    fn test_move_translates() {
        let crop = Rect::new(100.0, 100.0, 400.0, 400.0);
        let rect = move_rect(Offset::new(50.0, -25.0), image_rect(), crop);
        assert_eq!(rect, Rect::new(150.0, 75.0, 450.0, 375.0));
    }

    #[test]
    fn test_move_clamps_per_axis() {
        let crop = Rect::new(100.0, 100.0, 400.0, 400.0);
        let rect = move_rect(Offset::new(-500.0, 10.0), image_rect(), crop);
        assert_eq!(rect, Rect::new(0.0, 110.0, 300.0, 410.0));

        let rect = move_rect(Offset::new(10.0, 5000.0), image_rect(), crop);
        assert_eq!(rect, Rect::new(110.0, 700.0, 410.0, 1000.0));
    }

    #[test]
    fn test_move_is_reversible_away_from_bounds() {
        let crop = Rect::new(100.0, 100.0, 400.0, 400.0);
        let d = Offset::new(37.0, -12.0);
        let moved = move_rect(d, image_rect(), crop);
        assert_eq!(move_rect(-d, image_rect(), moved), crop);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
