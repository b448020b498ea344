//! Image effects: CSS filter strings for the browser surface and CPU pixel
//! transforms for the raster surface.
//!
//! The CPU versions follow the color matrices the CSS filter functions are
//! defined with, so both surfaces agree to within rounding.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use image::RgbaImage;

use crate::scene::Effect;

/// Gaussian standard deviation for `Effect::Blur`, in pixels.
pub const BLUR_RADIUS: f32 = 2.0;
pub const BRIGHTEN_FACTOR: f32 = 1.5;
pub const CONTRAST_FACTOR: f32 = 1.5;
pub const SATURATE_FACTOR: f32 = 1.8;
pub const HUE_ROTATE_DEGREES: f32 = 90.0;

impl Effect {
    /// Value for `CanvasRenderingContext2D.filter`.
    #[must_use]
    pub fn css_filter(self) -> &'static str {
        match self {
            Effect::Grayscale => "grayscale(100%)",
            Effect::Sepia => "sepia(100%)",
            Effect::Blur => "blur(2px)",
            Effect::Brighten => "brightness(1.5)",
            Effect::Contrast => "contrast(1.5)",
            Effect::Saturate => "saturate(1.8)",
            Effect::HueRotate => "hue-rotate(90deg)",
        }
    }
}

/// The canvas filter string for an optional effect.
#[must_use]
pub fn css_filter(effect: Option<Effect>) -> &'static str {
    effect.map_or("none", Effect::css_filter)
}

type Matrix = [[f32; 3]; 3];

const GRAYSCALE: Matrix = [
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
];

const SEPIA: Matrix = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

/// Run `transform` over every pixel. Channels are passed as `0..=255` floats
/// and clamped back into bytes.
fn apply_pixel_transform<F>(img: &mut RgbaImage, transform: F)
where
    F: Fn(f32, f32, f32, f32) -> (f32, f32, f32, f32),
{
    for px in img.pixels_mut() {
        let [r, g, b, a] = px.0;
        let (nr, ng, nb, na) = transform(f32::from(r), f32::from(g), f32::from(b), f32::from(a));
        px.0 = [to_byte(nr), to_byte(ng), to_byte(nb), to_byte(na)];
    }
}

fn to_byte(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn apply_matrix(img: &mut RgbaImage, m: &Matrix) {
    apply_pixel_transform(img, |r, g, b, a| {
        (
            m[0][0] * r + m[0][1] * g + m[0][2] * b,
            m[1][0] * r + m[1][1] * g + m[1][2] * b,
            m[2][0] * r + m[2][1] * g + m[2][2] * b,
            a,
        )
    });
}

/// How far, in pixels, `effect` reads beyond the pixel it writes.
#[must_use]
pub fn margin(effect: Effect) -> u32 {
    match effect {
        Effect::Blur => (BLUR_RADIUS * 3.0).ceil() as u32,
        _ => 0,
    }
}

/// Produce a filtered copy of `src`.
#[must_use]
pub fn apply(effect: Effect, src: &RgbaImage) -> RgbaImage {
    if effect == Effect::Blur {
        return image::imageops::blur(src, BLUR_RADIUS);
    }
    let mut out = src.clone();
    match effect {
        Effect::Grayscale => apply_matrix(&mut out, &GRAYSCALE),
        Effect::Sepia => apply_matrix(&mut out, &SEPIA),
        Effect::Saturate => apply_matrix(&mut out, &saturate_matrix(SATURATE_FACTOR)),
        Effect::HueRotate => apply_matrix(&mut out, &hue_rotate_matrix(HUE_ROTATE_DEGREES)),
        Effect::Brighten => apply_pixel_transform(&mut out, |r, g, b, a| {
            (r * BRIGHTEN_FACTOR, g * BRIGHTEN_FACTOR, b * BRIGHTEN_FACTOR, a)
        }),
        Effect::Contrast => apply_pixel_transform(&mut out, |r, g, b, a| {
            let c = |v: f32| (v - 127.5) * CONTRAST_FACTOR + 127.5;
            (c(r), c(g), c(b), a)
        }),
        Effect::Blur => {}
    }
    out
}
