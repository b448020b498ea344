//! Drawing surface abstraction.
//!
//! The render pipeline only talks to `Surface`. The browser build backs it
//! with a `CanvasRenderingContext2d` (see `web`), native hosts and tests use
//! the CPU `RasterSurface`. Coordinates are surface pixels with the origin at
//! the top-left.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::error::SurfaceError;
use crate::scene::{Effect, PlacedImage};
use crate::viewport::{Point, Rect};

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Lowercase `#rrggbb`, alpha ignored.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS color string: hex when opaque, `rgba(...)` otherwise.
    #[must_use]
    pub fn css(self) -> String {
        if self.a == 255 {
            self.to_hex()
        } else {
            let alpha = f64::from(self.a) / 255.0;
            format!("rgba({}, {}, {}, {alpha:.3})", self.r, self.g, self.b)
        }
    }
}

/// Outline style. `dash` is the dash and gap length for a dashed line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub dash: Option<f64>,
}

impl StrokeStyle {
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    #[must_use]
    pub fn dashed(color: Color, width: f64, dash: f64) -> Self {
        Self { color, width, dash: Some(dash) }
    }
}

/// Everything needed to paint one image, independent of its bitmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePaint {
    /// Destination box in surface coordinates.
    pub rect: Rect,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub opacity: f64,
    pub effect: Option<Effect>,
}

impl From<&PlacedImage> for ImagePaint {
    fn from(image: &PlacedImage) -> Self {
        Self {
            rect: image.bounds(),
            flip_horizontal: image.flip_horizontal,
            flip_vertical: image.flip_vertical,
            opacity: image.opacity,
            effect: image.effect,
        }
    }
}

/// A 2D drawing target.
///
/// Every draw call leaves the surface's drawing state as it found it, so one
/// image's alpha or filter never leaks into the next.
pub trait Surface {
    /// Decoded bitmap handle this surface can draw.
    type Bitmap: Clone;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reallocate to a new size. Contents are cleared.
    ///
    /// # Errors
    ///
    /// Zero width or height gives `SurfaceError::InvalidSize`.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError>;

    /// Reset every pixel to transparent.
    ///
    /// # Errors
    ///
    /// Returns the backend's failure.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Returns the backend's drawing failure.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Returns the backend's drawing failure.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Returns the backend's drawing failure.
    fn line(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), SurfaceError>;

    /// Draw `bitmap` scaled into `paint.rect`, mirrored about the rect's center
    /// per the flip flags, with the paint's opacity and effect.
    ///
    /// # Errors
    ///
    /// Returns the backend's drawing failure.
    fn draw_image(&mut self, bitmap: &Self::Bitmap, paint: &ImagePaint) -> Result<(), SurfaceError>;

    /// Filled, outlined disc with a centered glyph.
    ///
    /// # Errors
    ///
    /// Returns the backend's drawing failure.
    fn draw_badge(
        &mut self,
        center: Point,
        radius: f64,
        fill: Color,
        outline: &StrokeStyle,
        glyph: &str,
    ) -> Result<(), SurfaceError>;

    /// Replace this surface's contents with the `src` region of `source`,
    /// placed at the origin at the same size.
    ///
    /// # Errors
    ///
    /// Returns the backend's failure to read `source` or draw here.
    fn blit_from(&mut self, source: &Self, src: Rect) -> Result<(), SurfaceError>;

    /// Read one pixel. Out-of-bounds coordinates give `None`.
    ///
    /// # Errors
    ///
    /// Returns the backend's failure to read pixel data.
    fn pixel(&self, x: i64, y: i64) -> Result<Option<Color>, SurfaceError>;
}
