#![allow(clippy::float_cmp)]

use super::*;
use crate::scene::SourceRef;

#[test]
fn hex_is_lowercase_six_digits() {
    assert_eq!(Color::rgb(255, 165, 0).to_hex(), "#ffa500");
    assert_eq!(Color::rgb(1, 2, 3).to_hex(), "#010203");
    assert_eq!(Color::rgba(0xAB, 0xCD, 0xEF, 10).to_hex(), "#abcdef");
}

#[test]
fn css_uses_rgba_when_translucent() {
    assert_eq!(Color::rgb(255, 0, 0).css(), "#ff0000");
    assert_eq!(Color::rgba(255, 0, 0, 51).css(), "rgba(255, 0, 0, 0.200)");
}

#[test]
fn transparent_is_zero_alpha() {
    assert!(Color::TRANSPARENT.is_transparent());
    assert!(!Color::rgba(0, 0, 0, 1).is_transparent());
}

#[test]
fn paint_copies_image_fields() {
    let mut image = PlacedImage::new(SourceRef::Url("u".into()), Rect::new(1.0, 2.0, 30.0, 40.0));
    image.flip_vertical = true;
    image.opacity = 0.5;
    image.effect = Some(Effect::Sepia);
    let paint = ImagePaint::from(&image);
    assert_eq!(paint.rect, Rect::new(1.0, 2.0, 30.0, 40.0));
    assert!(paint.flip_vertical);
    assert!(!paint.flip_horizontal);
    assert_eq!(paint.opacity, 0.5);
    assert_eq!(paint.effect, Some(Effect::Sepia));
}
