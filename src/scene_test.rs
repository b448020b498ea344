#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_image(x: f64, y: f64, w: f64, h: f64) -> PlacedImage {
    PlacedImage::new(SourceRef::bytes(vec![1_u8, 2, 3]), Rect::new(x, y, w, h))
}

fn scene_of(n: usize) -> (Scene, Vec<ImageId>) {
    let mut scene = Scene::new();
    let mut ids = Vec::new();
    for i in 0..n {
        let image = make_image(i as f64 * 10.0, 0.0, 100.0, 100.0);
        ids.push(image.id);
        assert!(scene.add(image));
    }
    (scene, ids)
}

fn order(scene: &Scene) -> Vec<ImageId> {
    scene.images().iter().map(|i| i.id).collect()
}

// =============================================================
// PlacedImage
// =============================================================

#[test]
fn new_image_has_default_flags() {
    let image = make_image(1.0, 2.0, 300.0, 200.0);
    assert!(!image.flip_horizontal);
    assert!(!image.flip_vertical);
    assert!(!image.pinned);
    assert_eq!(image.opacity, 1.0);
    assert_eq!(image.effect, None);
    assert_eq!(image.bounds(), Rect::new(1.0, 2.0, 300.0, 200.0));
}

#[test]
fn new_image_floors_tiny_size() {
    let image = make_image(0.0, 0.0, 3.0, 0.0);
    assert_eq!(image.width, MIN_IMAGE_SIZE);
    assert_eq!(image.height, MIN_IMAGE_SIZE);
}

#[test]
fn set_bounds_floors_size() {
    let mut image = make_image(0.0, 0.0, 100.0, 100.0);
    image.set_bounds(Rect::new(5.0, 6.0, -40.0, 10.0));
    assert_eq!(image.position(), Point::new(5.0, 6.0));
    assert_eq!(image.size(), Size::new(20.0, 20.0));
}

#[test]
fn effect_serializes_kebab_case() {
    let s = serde_json::to_string(&Effect::HueRotate).unwrap();
    assert_eq!(s, "\"hue-rotate\"");
    let e: Effect = serde_json::from_str("\"brighten\"").unwrap();
    assert_eq!(e, Effect::Brighten);
}

// =============================================================
// Add / remove
// =============================================================

#[test]
fn add_appends_on_top() {
    let (scene, ids) = scene_of(3);
    assert_eq!(order(&scene), ids);
    assert_eq!(scene.len(), 3);
}

#[test]
fn add_rejects_duplicate_id() {
    let (mut scene, _) = scene_of(1);
    let copy = scene.images()[0].clone();
    assert!(!scene.add(copy));
    assert_eq!(scene.len(), 1);
}

#[test]
fn remove_twice_is_safe() {
    let (mut scene, ids) = scene_of(2);
    assert!(scene.remove(&ids[0]).is_some());
    assert!(scene.remove(&ids[0]).is_none());
    assert_eq!(order(&scene), vec![ids[1]]);
}

#[test]
fn remove_selected_clears_selection() {
    let (mut scene, ids) = scene_of(2);
    scene.select(Some(ids[1]));
    scene.remove(&ids[1]);
    assert_eq!(scene.selected_id(), None);
    assert!(scene.selected().is_none());
}

#[test]
fn remove_other_keeps_selection() {
    let (mut scene, ids) = scene_of(2);
    scene.select(Some(ids[1]));
    scene.remove(&ids[0]);
    assert_eq!(scene.selected_id(), Some(ids[1]));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn dangling_selection_reads_as_none() {
    let (mut scene, _) = scene_of(1);
    scene.select(Some(Uuid::new_v4()));
    assert_eq!(scene.selected_id(), None);
    assert!(scene.selected().is_none());
    assert!(!scene.mutate_selected(|i| i.pinned = true));
}

#[test]
fn select_none_clears() {
    let (mut scene, ids) = scene_of(1);
    scene.select(Some(ids[0]));
    scene.select(None);
    assert!(scene.selected().is_none());
}

// =============================================================
// Z-order
// =============================================================

#[test]
fn bring_forward_swaps_with_next() {
    let (mut scene, ids) = scene_of(3);
    assert!(scene.bring_forward(&ids[0]));
    assert_eq!(order(&scene), vec![ids[1], ids[0], ids[2]]);
}

#[test]
fn bring_forward_at_top_is_noop() {
    let (mut scene, ids) = scene_of(3);
    assert!(!scene.bring_forward(&ids[2]));
    assert_eq!(order(&scene), ids);
}

#[test]
fn send_backward_at_bottom_is_noop() {
    let (mut scene, ids) = scene_of(3);
    assert!(!scene.send_backward(&ids[0]));
    assert_eq!(order(&scene), ids);
}

#[test]
fn forward_then_backward_restores_order() {
    let (mut scene, ids) = scene_of(4);
    scene.bring_forward(&ids[1]);
    scene.send_backward(&ids[1]);
    assert_eq!(order(&scene), ids);
}

#[test]
fn reorder_unknown_id_is_noop() {
    let (mut scene, ids) = scene_of(2);
    assert!(!scene.bring_forward(&Uuid::new_v4()));
    assert!(!scene.send_backward(&Uuid::new_v4()));
    assert_eq!(order(&scene), ids);
}

// =============================================================
// Mutation
// =============================================================

#[test]
fn mutate_applies_size_floor() {
    let (mut scene, ids) = scene_of(1);
    assert!(scene.mutate(&ids[0], |i| {
        i.width = 5.0;
        i.height = -10.0;
    }));
    let image = scene.get(&ids[0]).unwrap();
    assert_eq!(image.width, 20.0);
    assert_eq!(image.height, 20.0);
}

#[test]
fn mutate_cannot_change_id() {
    let (mut scene, ids) = scene_of(1);
    scene.mutate(&ids[0], |i| i.id = Uuid::new_v4());
    assert!(scene.get(&ids[0]).is_some());
}

#[test]
fn mutate_selected_without_selection_is_noop() {
    let (mut scene, ids) = scene_of(1);
    assert!(!scene.mutate_selected(|i| i.pinned = true));
    assert!(!scene.get(&ids[0]).unwrap().pinned);
}

#[test]
fn mutate_selected_targets_selection() {
    let (mut scene, ids) = scene_of(2);
    scene.select(Some(ids[0]));
    assert!(scene.mutate_selected(|i| i.flip_vertical = true));
    assert!(scene.get(&ids[0]).unwrap().flip_vertical);
    assert!(!scene.get(&ids[1]).unwrap().flip_vertical);
}

// =============================================================
// Observers
// =============================================================

#[test]
fn observers_hear_every_mutation() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let mut scene = Scene::new();
    scene.subscribe(move |event| sink.borrow_mut().push(*event));

    let a = make_image(0.0, 0.0, 50.0, 50.0);
    let b = make_image(0.0, 0.0, 50.0, 50.0);
    let (a_id, b_id) = (a.id, b.id);
    scene.add(a);
    scene.add(b);
    scene.select(Some(a_id));
    scene.bring_forward(&a_id);
    scene.mutate_selected(|i| i.pinned = true);
    scene.remove(&a_id);

    assert_eq!(
        *log.borrow(),
        vec![
            SceneEvent::Added(a_id),
            SceneEvent::Added(b_id),
            SceneEvent::SelectionChanged(Some(a_id)),
            SceneEvent::Reordered(a_id),
            SceneEvent::Updated(a_id),
            SceneEvent::Removed(a_id),
            SceneEvent::SelectionChanged(None),
        ]
    );
}

#[test]
fn noop_mutations_stay_silent() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let (mut scene, ids) = scene_of(1);
    scene.subscribe(move |event| sink.borrow_mut().push(*event));

    scene.remove(&Uuid::new_v4());
    scene.bring_forward(&ids[0]);
    scene.select(None);

    assert!(log.borrow().is_empty());
}
