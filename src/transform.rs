//! Resize math and per-image mutators.
//!
//! The resize functions are pure: they take the geometry captured when the
//! resize session began and return the new bounds. The mutators are plain
//! field edits meant to run inside `Scene::mutate`.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use uuid::Uuid;

use crate::consts::MIN_IMAGE_SIZE;
use crate::hit::ResizeHandle;
use crate::scene::{Effect, PlacedImage};
use crate::viewport::{Point, Rect, Size};

// =============================================================
// Resize
// =============================================================

/// Aspect-locked resize from a corner handle.
///
/// The candidate box runs from the corner opposite `handle` to `pointer`,
/// floored at the minimum size. The smaller of the two axis scale factors is
/// applied to `anchor_size`, and the result is placed so the opposite corner
/// stays where it was when the session began. Edge handles return the anchor
/// bounds unchanged.
#[must_use]
pub fn resize_corner(handle: ResizeHandle, anchor_pos: Point, anchor_size: Size, pointer: Point) -> Rect {
    let right = anchor_pos.x + anchor_size.width;
    let bottom = anchor_pos.y + anchor_size.height;

    let (raw_w, raw_h) = match handle {
        ResizeHandle::Se => (pointer.x - anchor_pos.x, pointer.y - anchor_pos.y),
        ResizeHandle::Nw => (right - pointer.x, bottom - pointer.y),
        ResizeHandle::Ne => (pointer.x - anchor_pos.x, bottom - pointer.y),
        ResizeHandle::Sw => (right - pointer.x, pointer.y - anchor_pos.y),
        ResizeHandle::N | ResizeHandle::S | ResizeHandle::E | ResizeHandle::W => {
            return Rect::new(anchor_pos.x, anchor_pos.y, anchor_size.width, anchor_size.height);
        }
    };

    let width_scale = raw_w.max(MIN_IMAGE_SIZE) / anchor_size.width;
    let height_scale = raw_h.max(MIN_IMAGE_SIZE) / anchor_size.height;
    let scale = width_scale.min(height_scale);

    let width = (anchor_size.width * scale).max(MIN_IMAGE_SIZE);
    let height = (anchor_size.height * scale).max(MIN_IMAGE_SIZE);

    let (x, y) = match handle {
        ResizeHandle::Nw => (right - width, bottom - height),
        ResizeHandle::Ne => (anchor_pos.x, bottom - height),
        ResizeHandle::Sw => (right - width, anchor_pos.y),
        _ => (anchor_pos.x, anchor_pos.y),
    };
    Rect::new(x, y, width, height)
}

/// Single-axis resize from an edge handle.
///
/// East and south grow the size by `delta`. West and north shrink it by
/// `delta` and move the position so the far edge stays put. Corner handles
/// return the anchor bounds unchanged.
#[must_use]
pub fn resize_edge(handle: ResizeHandle, anchor_pos: Point, anchor_size: Size, delta: Point) -> Rect {
    let mut rect = Rect::new(anchor_pos.x, anchor_pos.y, anchor_size.width, anchor_size.height);
    match handle {
        ResizeHandle::E => {
            rect.width = (anchor_size.width + delta.x).max(MIN_IMAGE_SIZE);
        }
        ResizeHandle::S => {
            rect.height = (anchor_size.height + delta.y).max(MIN_IMAGE_SIZE);
        }
        ResizeHandle::W => {
            rect.width = (anchor_size.width - delta.x).max(MIN_IMAGE_SIZE);
            rect.x = anchor_pos.x + (anchor_size.width - rect.width);
        }
        ResizeHandle::N => {
            rect.height = (anchor_size.height - delta.y).max(MIN_IMAGE_SIZE);
            rect.y = anchor_pos.y + (anchor_size.height - rect.height);
        }
        ResizeHandle::Nw | ResizeHandle::Ne | ResizeHandle::Sw | ResizeHandle::Se => {}
    }
    rect
}

/// Dispatch to the corner or edge resize for `handle`.
#[must_use]
pub fn resize(handle: ResizeHandle, anchor_pos: Point, anchor_size: Size, pointer_start: Point, pointer: Point) -> Rect {
    if handle.is_corner() {
        resize_corner(handle, anchor_pos, anchor_size, pointer)
    } else {
        resize_edge(handle, anchor_pos, anchor_size, pointer.sub(pointer_start))
    }
}

// =============================================================
// Mutators
// =============================================================

/// Mirrored at paint time about the image's center. Geometry is untouched.
pub fn flip_horizontal(image: &mut PlacedImage) {
    image.flip_horizontal = !image.flip_horizontal;
}

pub fn flip_vertical(image: &mut PlacedImage) {
    image.flip_vertical = !image.flip_vertical;
}

/// Clamped to `[0, 1]`. NaN is treated as fully transparent.
pub fn set_opacity(image: &mut PlacedImage, opacity: f64) {
    image.opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
}

pub fn toggle_pin(image: &mut PlacedImage) {
    image.pinned = !image.pinned;
}

/// Apply `effect`, or clear it if it is already the active one.
pub fn toggle_effect(image: &mut PlacedImage, effect: Effect) {
    image.effect = if image.effect == Some(effect) { None } else { Some(effect) };
}

/// A copy of `image` with a fresh id, shifted by `offset`.
#[must_use]
pub fn duplicate(image: &PlacedImage, offset: Point) -> PlacedImage {
    PlacedImage {
        id: Uuid::new_v4(),
        x: image.x + offset.x,
        y: image.y + offset.y,
        ..image.clone()
    }
}
