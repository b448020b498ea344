#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::scene::SourceRef;

// =============================================================
// Helpers
// =============================================================

fn image() -> PlacedImage {
    PlacedImage::new(SourceRef::Url("x.png".into()), Rect::new(100.0, 100.0, 200.0, 100.0))
}

const POS: Point = Point { x: 100.0, y: 100.0 };
const SIZE: Size = Size { width: 200.0, height: 100.0 };

// =============================================================
// resize_corner
// =============================================================

#[test]
fn sw_corner_uses_smaller_scale() {
    // Raw target box is 100x300: scale = min(0.5, 3.0).
    let r = resize_corner(ResizeHandle::Sw, POS, SIZE, Point::new(200.0, 400.0));
    assert_eq!(r.width, 100.0);
    assert_eq!(r.height, 50.0);
    // North-east corner stays at (300, 100).
    assert_eq!(r.x, 200.0);
    assert_eq!(r.y, 100.0);
}

#[test]
fn se_corner_keeps_top_left() {
    let r = resize_corner(ResizeHandle::Se, POS, SIZE, Point::new(500.0, 300.0));
    assert_eq!(r, Rect::new(100.0, 100.0, 400.0, 200.0));
}

#[test]
fn nw_corner_keeps_bottom_right() {
    let r = resize_corner(ResizeHandle::Nw, POS, SIZE, Point::new(200.0, 120.0));
    // raw 100x80 -> scales 0.5 / 0.8 -> 0.5
    assert_eq!(r.width, 100.0);
    assert_eq!(r.height, 50.0);
    assert_eq!(r.right(), 300.0);
    assert_eq!(r.bottom(), 200.0);
}

#[test]
fn ne_corner_keeps_bottom_left() {
    let r = resize_corner(ResizeHandle::Ne, POS, SIZE, Point::new(700.0, -100.0));
    // raw 600x300 -> scale 3.0
    assert_eq!(r.width, 600.0);
    assert_eq!(r.height, 300.0);
    assert_eq!(r.x, 100.0);
    assert_eq!(r.bottom(), 200.0);
}

#[test]
fn corner_dragged_past_opposite_corner_floors() {
    let r = resize_corner(ResizeHandle::Se, POS, SIZE, Point::new(-500.0, -500.0));
    assert!(r.width >= MIN_IMAGE_SIZE);
    assert!(r.height >= MIN_IMAGE_SIZE);
    assert_eq!(r.x, 100.0);
    assert_eq!(r.y, 100.0);
}

#[test]
fn corner_shrinks_down_to_floor() {
    // Raw 40x20 keeps the 2:1 aspect and puts the short side on the floor.
    let r = resize_corner(ResizeHandle::Se, POS, SIZE, Point::new(140.0, 120.0));
    assert_eq!(r.width, 40.0);
    assert_eq!(r.height, 20.0);
}

#[test]
fn corner_resize_with_edge_handle_is_identity() {
    let r = resize_corner(ResizeHandle::E, POS, SIZE, Point::new(999.0, 999.0));
    assert_eq!(r, Rect::new(100.0, 100.0, 200.0, 100.0));
}

// =============================================================
// resize_edge
// =============================================================

#[test]
fn east_edge_grows_width_only() {
    let r = resize_edge(ResizeHandle::E, POS, SIZE, Point::new(50.0, 80.0));
    assert_eq!(r, Rect::new(100.0, 100.0, 250.0, 100.0));
}

#[test]
fn south_edge_grows_height_only() {
    let r = resize_edge(ResizeHandle::S, POS, SIZE, Point::new(80.0, -30.0));
    assert_eq!(r, Rect::new(100.0, 100.0, 200.0, 70.0));
}

#[test]
fn west_edge_keeps_right_edge() {
    let r = resize_edge(ResizeHandle::W, POS, SIZE, Point::new(50.0, 0.0));
    assert_eq!(r.width, 150.0);
    assert_eq!(r.x, 150.0);
    assert_eq!(r.right(), 300.0);
}

#[test]
fn north_edge_keeps_bottom_edge() {
    let r = resize_edge(ResizeHandle::N, POS, SIZE, Point::new(0.0, -40.0));
    assert_eq!(r.height, 140.0);
    assert_eq!(r.y, 60.0);
    assert_eq!(r.bottom(), 200.0);
}

#[test]
fn west_edge_past_opposite_side_floors() {
    let r = resize_edge(ResizeHandle::W, POS, SIZE, Point::new(1000.0, 0.0));
    assert_eq!(r.width, MIN_IMAGE_SIZE);
    assert_eq!(r.right(), 300.0);
}

#[test]
fn resize_dispatches_by_handle() {
    let start = Point::new(300.0, 150.0);
    let edge = resize(ResizeHandle::E, POS, SIZE, start, Point::new(320.0, 150.0));
    assert_eq!(edge.width, 220.0);
    let corner = resize(ResizeHandle::Se, POS, SIZE, start, Point::new(500.0, 300.0));
    assert_eq!(corner, Rect::new(100.0, 100.0, 400.0, 200.0));
}

// =============================================================
// Mutators
// =============================================================

#[test]
fn flips_toggle_back() {
    let mut img = image();
    flip_horizontal(&mut img);
    assert!(img.flip_horizontal);
    flip_horizontal(&mut img);
    assert!(!img.flip_horizontal);
    flip_vertical(&mut img);
    flip_vertical(&mut img);
    assert!(!img.flip_vertical);
    assert_eq!(img.bounds(), Rect::new(100.0, 100.0, 200.0, 100.0));
}

#[test]
fn opacity_is_clamped() {
    let mut img = image();
    set_opacity(&mut img, 1.7);
    assert_eq!(img.opacity, 1.0);
    set_opacity(&mut img, -0.2);
    assert_eq!(img.opacity, 0.0);
    set_opacity(&mut img, 0.35);
    assert_eq!(img.opacity, 0.35);
}

#[test]
fn pin_toggles() {
    let mut img = image();
    toggle_pin(&mut img);
    assert!(img.pinned);
    toggle_pin(&mut img);
    assert!(!img.pinned);
}

#[test]
fn same_effect_twice_clears() {
    let mut img = image();
    toggle_effect(&mut img, Effect::Sepia);
    assert_eq!(img.effect, Some(Effect::Sepia));
    toggle_effect(&mut img, Effect::Blur);
    assert_eq!(img.effect, Some(Effect::Blur));
    toggle_effect(&mut img, Effect::Blur);
    assert_eq!(img.effect, None);
}

#[test]
fn duplicate_gets_new_id_and_offset() {
    let mut img = image();
    img.pinned = true;
    img.effect = Some(Effect::Grayscale);
    let copy = duplicate(&img, Point::new(20.0, 20.0));
    assert_ne!(copy.id, img.id);
    assert_eq!(copy.position(), Point::new(120.0, 120.0));
    assert_eq!(copy.size(), img.size());
    assert!(copy.pinned);
    assert_eq!(copy.effect, Some(Effect::Grayscale));
    assert_eq!(copy.source, img.source);
}
