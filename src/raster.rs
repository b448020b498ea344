//! CPU surface over an `image::RgbaImage`.
//!
//! Used by native hosts and by the test suite in place of a browser canvas.
//! Pixels are stored as straight (non-premultiplied) RGBA. A pixel is covered
//! by a shape when its center falls inside the shape, so a rect at
//! `(0.0, 0.0, 10.0, 10.0)` covers exactly pixels `0..10` on both axes.
//!
//! Glyphs are not rasterized: `draw_badge` paints the disc and ring only.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use std::ops::Range;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::SurfaceError;
use crate::filter;
use crate::surface::{Color, ImagePaint, StrokeStyle, Surface};
use crate::viewport::{Point, Rect};

/// An in-memory RGBA surface.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { pixels: RgbaImage::new(width, height) }
    }

    #[must_use]
    pub fn from_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, opacity: f32) {
        let dst = self.pixels.get_pixel_mut(x, y);
        dst.0 = over(dst.0, [color.r, color.g, color.b, color.a], opacity);
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        let xs = span(rect.x, rect.width, self.pixels.width());
        let ys = span(rect.y, rect.height, self.pixels.height());
        for y in ys {
            for x in xs.clone() {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn solid_segment(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let half = width / 2.0;
        if from.y == to.y {
            let x = from.x.min(to.x);
            self.fill(Rect::new(x, from.y - half, (to.x - from.x).abs(), width), color);
        } else if from.x == to.x {
            let y = from.y.min(to.y);
            self.fill(Rect::new(from.x - half, y, width, (to.y - from.y).abs()), color);
        } else {
            let d = to.sub(from);
            let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0);
            let n = steps as u32;
            for k in 0..=n {
                let t = f64::from(k) / steps;
                let p = Point::new(from.x + d.x * t, from.y + d.y * t);
                self.fill(Rect::new(p.x - half, p.y - half, width, width), color);
            }
        }
    }
}

/// Straight-alpha source-over with an extra opacity multiplier on the source.
#[must_use]
pub fn over(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    let sa = f32::from(src[3]) / 255.0 * opacity.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) / out_a;
        out[i] = to_byte(c);
    }
    out[3] = to_byte(out_a * 255.0);
    out
}

fn to_byte(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Pixel indices whose centers fall in `[start, start + len)`, clipped to `0..limit`.
fn span(start: f64, len: f64, limit: u32) -> Range<u32> {
    let max = f64::from(limit);
    let lo = (start - 0.5).ceil().clamp(0.0, max) as u32;
    let hi = (start + len - 0.5).ceil().clamp(0.0, max) as u32;
    lo..hi.max(lo)
}

/// Destination pixels to sample for an image: the clipped span `visible`
/// widened by `margin` on each side, kept within the pixels the rect covers.
fn window(visible: &Range<u32>, start: f64, len: f64, margin: u32) -> Range<i64> {
    let covered_lo = (start - 0.5).ceil() as i64;
    let covered_hi = (start + len - 0.5).ceil() as i64;
    let lo = (i64::from(visible.start) - i64::from(margin)).max(covered_lo);
    let hi = (i64::from(visible.end) + i64::from(margin)).min(covered_hi);
    lo..hi.max(lo)
}

/// Source index for a destination offset into a box of `extent` mapped onto `n` samples.
fn sample_index(offset: f64, extent: f64, n: u32) -> u32 {
    let i = (offset / extent * f64::from(n)).floor();
    i.clamp(0.0, f64::from(n.saturating_sub(1))) as u32
}

impl Surface for RasterSurface {
    type Bitmap = Arc<RgbaImage>;

    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        self.pixels = RgbaImage::new(width, height);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        for px in self.pixels.pixels_mut() {
            px.0 = [0, 0, 0, 0];
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.fill(rect, color);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError> {
        let tl = Point::new(rect.x, rect.y);
        let tr = Point::new(rect.right(), rect.y);
        let br = Point::new(rect.right(), rect.bottom());
        let bl = Point::new(rect.x, rect.bottom());
        for (from, to) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
            self.line(from, to, style)?;
        }
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), SurfaceError> {
        let Some(dash) = style.dash.filter(|d| *d > 0.0) else {
            self.solid_segment(from, to, style.width, style.color);
            return Ok(());
        };
        let d = to.sub(from);
        let length = d.x.hypot(d.y);
        if length == 0.0 {
            return Ok(());
        }
        let mut t = 0.0;
        while t < length {
            let end = (t + dash).min(length);
            let a = Point::new(from.x + d.x * t / length, from.y + d.y * t / length);
            let b = Point::new(from.x + d.x * end / length, from.y + d.y * end / length);
            self.solid_segment(a, b, style.width, style.color);
            t += dash * 2.0;
        }
        Ok(())
    }

    fn draw_image(&mut self, bitmap: &Self::Bitmap, paint: &ImagePaint) -> Result<(), SurfaceError> {
        let opacity = paint.opacity.clamp(0.0, 1.0) as f32;
        let xs = span(paint.rect.x, paint.rect.width, self.pixels.width());
        let ys = span(paint.rect.y, paint.rect.height, self.pixels.height());
        if opacity <= 0.0 || xs.is_empty() || ys.is_empty() || bitmap.width() == 0 || bitmap.height() == 0 {
            return Ok(());
        }

        // Only the on-surface part of the rect is sampled, widened by the
        // effect's reach so blur at the clip edge sees its neighbours.
        let margin = paint.effect.map_or(0, filter::margin);
        let wx = window(&xs, paint.rect.x, paint.rect.width, margin);
        let wy = window(&ys, paint.rect.y, paint.rect.height, margin);
        let mut sampled = RgbaImage::new((wx.end - wx.start) as u32, (wy.end - wy.start) as u32);
        for (ox, oy, px) in sampled.enumerate_pixels_mut() {
            let dx = (wx.start + i64::from(ox)) as f64 + 0.5 - paint.rect.x;
            let dy = (wy.start + i64::from(oy)) as f64 + 0.5 - paint.rect.y;
            let mut sx = sample_index(dx, paint.rect.width, bitmap.width());
            let mut sy = sample_index(dy, paint.rect.height, bitmap.height());
            if paint.flip_horizontal {
                sx = bitmap.width() - 1 - sx;
            }
            if paint.flip_vertical {
                sy = bitmap.height() - 1 - sy;
            }
            *px = *bitmap.get_pixel(sx, sy);
        }
        if let Some(effect) = paint.effect {
            sampled = filter::apply(effect, &sampled);
        }

        for y in ys {
            let oy = (i64::from(y) - wy.start) as u32;
            for x in xs.clone() {
                let ox = (i64::from(x) - wx.start) as u32;
                let src = sampled.get_pixel(ox, oy).0;
                let dst = self.pixels.get_pixel_mut(x, y);
                dst.0 = over(dst.0, src, opacity);
            }
        }
        Ok(())
    }

    fn draw_badge(
        &mut self,
        center: Point,
        radius: f64,
        fill: Color,
        outline: &StrokeStyle,
        _glyph: &str,
    ) -> Result<(), SurfaceError> {
        let half = outline.width / 2.0;
        let reach = radius + half;
        let xs = span(center.x - reach, reach * 2.0, self.pixels.width());
        let ys = span(center.y - reach, reach * 2.0, self.pixels.height());
        for y in ys {
            for x in xs.clone() {
                let dx = f64::from(x) + 0.5 - center.x;
                let dy = f64::from(y) + 0.5 - center.y;
                let dist = dx.hypot(dy);
                if dist <= radius {
                    self.blend(x, y, fill, 1.0);
                }
                if (dist - radius).abs() <= half {
                    self.blend(x, y, outline.color, 1.0);
                }
            }
        }
        Ok(())
    }

    fn blit_from(&mut self, source: &Self, src: Rect) -> Result<(), SurfaceError> {
        self.clear()?;
        let ox = src.x.round() as i64;
        let oy = src.y.round() as i64;
        let w = (src.width.round().max(0.0) as u32).min(self.pixels.width());
        let h = (src.height.round().max(0.0) as u32).min(self.pixels.height());
        for y in 0..h {
            for x in 0..w {
                if let Some(color) = source.pixel(ox + i64::from(x), oy + i64::from(y))? {
                    self.pixels.get_pixel_mut(x, y).0 = [color.r, color.g, color.b, color.a];
                }
            }
        }
        Ok(())
    }

    fn pixel(&self, x: i64, y: i64) -> Result<Option<Color>, SurfaceError> {
        let (Ok(ux), Ok(uy)) = (u32::try_from(x), u32::try_from(y)) else {
            return Ok(None);
        };
        if ux >= self.pixels.width() || uy >= self.pixels.height() {
            return Ok(None);
        }
        let [r, g, b, a] = self.pixels.get_pixel(ux, uy).0;
        Ok(Some(Color::rgba(r, g, b, a)))
    }
}
