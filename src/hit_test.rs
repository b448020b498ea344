#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::scene::SourceRef;
use crate::viewport::Rect;

// =============================================================
// Helpers
// =============================================================

fn image_at(x: f64, y: f64, w: f64, h: f64) -> PlacedImage {
    PlacedImage::new(SourceRef::Url("a.png".into()), Rect::new(x, y, w, h))
}

fn classify(x: f64, y: f64, image: &PlacedImage) -> Option<ResizeHandle> {
    classify_handle(Point::new(x, y), image)
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_test_empty_scene_misses() {
    assert!(hit_test(Point::new(0.0, 0.0), &[]).is_none());
}

#[test]
fn hit_test_prefers_topmost() {
    let bottom = image_at(0.0, 0.0, 100.0, 100.0);
    let top = image_at(50.0, 50.0, 100.0, 100.0);
    let top_id = top.id;
    let images = vec![bottom, top];
    assert_eq!(hit_test(Point::new(75.0, 75.0), &images).map(|i| i.id), Some(top_id));
}

#[test]
fn hit_test_falls_through_to_lower_image() {
    let bottom = image_at(0.0, 0.0, 100.0, 100.0);
    let bottom_id = bottom.id;
    let top = image_at(50.0, 50.0, 100.0, 100.0);
    let images = vec![bottom, top];
    assert_eq!(hit_test(Point::new(10.0, 10.0), &images).map(|i| i.id), Some(bottom_id));
}

#[test]
fn hit_test_bounds_are_inclusive() {
    let images = vec![image_at(10.0, 10.0, 100.0, 100.0)];
    assert!(hit_test(Point::new(110.0, 110.0), &images).is_some());
    assert!(hit_test(Point::new(10.0, 10.0), &images).is_some());
    assert!(hit_test(Point::new(110.1, 50.0), &images).is_none());
}

// =============================================================
// classify_handle
// =============================================================

#[test]
fn classify_outside_is_none() {
    let image = image_at(0.0, 0.0, 300.0, 300.0);
    assert_eq!(classify(-1.0, 10.0, &image), None);
}

#[test]
fn classify_interior_is_none() {
    let image = image_at(0.0, 0.0, 300.0, 300.0);
    assert_eq!(classify(150.0, 150.0, &image), None);
}

#[test]
fn corner_beats_edge() {
    let image = image_at(0.0, 0.0, 300.0, 300.0);
    assert_eq!(classify(10.0, 10.0, &image), Some(ResizeHandle::Nw));
}

#[test]
fn each_corner_is_classified() {
    let image = image_at(0.0, 0.0, 300.0, 300.0);
    assert_eq!(classify(290.0, 5.0, &image), Some(ResizeHandle::Ne));
    assert_eq!(classify(5.0, 290.0, &image), Some(ResizeHandle::Sw));
    assert_eq!(classify(295.0, 295.0, &image), Some(ResizeHandle::Se));
}

#[test]
fn corner_zone_reaches_thirty_units() {
    let image = image_at(0.0, 0.0, 300.0, 300.0);
    assert_eq!(classify(30.0, 30.0, &image), Some(ResizeHandle::Nw));
    assert_eq!(classify(31.0, 10.0, &image), Some(ResizeHandle::N));
}

#[test]
fn each_edge_is_classified() {
    let image = image_at(0.0, 0.0, 300.0, 300.0);
    assert_eq!(classify(5.0, 150.0, &image), Some(ResizeHandle::W));
    assert_eq!(classify(295.0, 150.0, &image), Some(ResizeHandle::E));
    assert_eq!(classify(150.0, 15.0, &image), Some(ResizeHandle::N));
    assert_eq!(classify(150.0, 285.0, &image), Some(ResizeHandle::S));
}

#[test]
fn edge_zone_stops_at_fifteen_units() {
    let image = image_at(0.0, 0.0, 300.0, 300.0);
    assert_eq!(classify(15.0, 150.0, &image), Some(ResizeHandle::W));
    assert_eq!(classify(15.5, 150.0, &image), None);
}

#[test]
fn small_image_is_all_corners() {
    // No point of a 40x40 image escapes the corner squares.
    let image = image_at(0.0, 0.0, 40.0, 40.0);
    assert_eq!(classify(20.0, 20.0, &image), Some(ResizeHandle::Nw));
    assert_eq!(classify(35.0, 5.0, &image), Some(ResizeHandle::Ne));
    assert_eq!(classify(25.0, 35.0, &image), Some(ResizeHandle::Sw));
    assert_eq!(classify(35.0, 35.0, &image), Some(ResizeHandle::Se));
}

#[test]
fn is_corner_splits_handles() {
    assert!(ResizeHandle::Se.is_corner());
    assert!(!ResizeHandle::S.is_corner());
}

// =============================================================
// pick
// =============================================================

#[test]
fn pick_reports_handle_of_top_image() {
    let image = image_at(100.0, 100.0, 300.0, 300.0);
    let id = image.id;
    let hit = pick(Point::new(395.0, 250.0), &[image]).unwrap();
    assert_eq!(hit, Hit { id, handle: Some(ResizeHandle::E) });
}

#[test]
fn pick_body_has_no_handle() {
    let image = image_at(100.0, 100.0, 300.0, 300.0);
    let hit = pick(Point::new(250.0, 250.0), &[image]).unwrap();
    assert_eq!(hit.handle, None);
}
