//! Render pipeline: compose the scene onto the virtual surface, then present
//! the viewport window onto the visible surface.
//!
//! `compose` draws the background grid and every image in paint order. Images
//! whose bitmap is not cached yet are skipped and reported back so the engine
//! can request decodes and hold the present until they land. `present` is the
//! only step that depends on the pan offset.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::cache::ImageCache;
use crate::consts::{
    BADGE_OUTLINE_COLOR, CORNER_HIGHLIGHT, CORNER_THRESHOLD, EDGE_THRESHOLD, GRID_COLOR, GRID_LINE_WIDTH, HANDLE_DASH,
    PIN_BADGE_INSET_X, PIN_BADGE_INSET_Y, PIN_BADGE_OUTLINE_WIDTH, PIN_BADGE_RADIUS, PIN_GLYPH, PINNED_COLOR,
    SELECTION_COLOR, SELECTION_DASH, SELECTION_LINE_WIDTH,
};
use crate::error::SurfaceError;
use crate::scene::{ImageId, PlacedImage, Scene};
use crate::surface::{ImagePaint, StrokeStyle, Surface};
use crate::viewport::{Point, Rect, Size, Viewport};

/// Redraw the whole virtual surface.
///
/// Returns the ids of images that could not be painted for lack of a cached
/// bitmap, in paint order. A failure drawing one image is logged and does not
/// stop the others.
///
/// # Errors
///
/// Fails if clearing the surface or drawing the grid fails.
pub fn compose<S: Surface>(
    surface: &mut S,
    scene: &Scene,
    cache: &ImageCache<S::Bitmap>,
    grid_period: f64,
) -> Result<Vec<ImageId>, SurfaceError> {
    surface.clear()?;
    let extent = Size::new(f64::from(surface.width()), f64::from(surface.height()));
    draw_grid(surface, extent, grid_period)?;

    let selected = scene.selected_id();
    let mut missing = Vec::new();
    for image in scene.images() {
        let Some(bitmap) = cache.get(&image.id) else {
            missing.push(image.id);
            continue;
        };
        if let Err(e) = surface.draw_image(bitmap, &ImagePaint::from(image)) {
            tracing::warn!(id = %image.id, error = %e, "image draw failed");
            continue;
        }
        if selected == Some(image.id) {
            if let Err(e) = draw_selection(surface, image) {
                tracing::warn!(id = %image.id, error = %e, "selection draw failed");
            }
        }
    }
    Ok(missing)
}

/// Copy the viewport's window of `virtual_surface` onto `visible`.
///
/// # Errors
///
/// Returns the blit error from `visible`.
pub fn present<S: Surface>(visible: &mut S, virtual_surface: &S, viewport: &Viewport) -> Result<(), SurfaceError> {
    visible.blit_from(virtual_surface, viewport.source_rect())
}

/// Grid lines every `period` units from 0 through the extent, inclusive.
///
/// # Errors
///
/// Stops at the first line the surface fails to draw.
pub fn draw_grid<S: Surface>(surface: &mut S, extent: Size, period: f64) -> Result<(), SurfaceError> {
    if period <= 0.0 {
        return Ok(());
    }
    let style = StrokeStyle::solid(GRID_COLOR, GRID_LINE_WIDTH);

    let mut x = 0.0;
    while x <= extent.width {
        surface.line(Point::new(x, 0.0), Point::new(x, extent.height), &style)?;
        x += period;
    }
    let mut y = 0.0;
    while y <= extent.height {
        surface.line(Point::new(0.0, y), Point::new(extent.width, y), &style)?;
        y += period;
    }
    Ok(())
}

/// Selection decorations for one image.
///
/// A dashed outline (orange when pinned, red otherwise), dashed outlines over
/// the four edge zones, translucent fills over the four corner zones, and a
/// pin badge near the top-right corner when pinned.
///
/// # Errors
///
/// Stops at the first decoration the surface fails to draw.
pub fn draw_selection<S: Surface>(surface: &mut S, image: &PlacedImage) -> Result<(), SurfaceError> {
    let bounds = image.bounds();
    let outline_color = if image.pinned { PINNED_COLOR } else { SELECTION_COLOR };
    surface.stroke_rect(bounds, &StrokeStyle::dashed(outline_color, SELECTION_LINE_WIDTH, SELECTION_DASH))?;

    let edge_style = StrokeStyle::dashed(SELECTION_COLOR, 1.0, HANDLE_DASH);
    for zone in edge_zones(bounds) {
        surface.stroke_rect(zone, &edge_style)?;
    }
    for zone in corner_zones(bounds) {
        surface.fill_rect(zone, CORNER_HIGHLIGHT)?;
    }

    if image.pinned {
        let center = Point::new(bounds.right() - PIN_BADGE_INSET_X, bounds.y + PIN_BADGE_INSET_Y);
        surface.draw_badge(
            center,
            PIN_BADGE_RADIUS,
            PINNED_COLOR,
            &StrokeStyle::solid(BADGE_OUTLINE_COLOR, PIN_BADGE_OUTLINE_WIDTH),
            PIN_GLYPH,
        )?;
    }
    Ok(())
}

/// West, east, north, south strips.
#[must_use]
pub fn edge_zones(b: Rect) -> [Rect; 4] {
    [
        Rect::new(b.x, b.y, EDGE_THRESHOLD, b.height),
        Rect::new(b.right() - EDGE_THRESHOLD, b.y, EDGE_THRESHOLD, b.height),
        Rect::new(b.x, b.y, b.width, EDGE_THRESHOLD),
        Rect::new(b.x, b.bottom() - EDGE_THRESHOLD, b.width, EDGE_THRESHOLD),
    ]
}

/// Northwest, northeast, southwest, southeast squares.
#[must_use]
pub fn corner_zones(b: Rect) -> [Rect; 4] {
    let c = CORNER_THRESHOLD;
    [
        Rect::new(b.x, b.y, c, c),
        Rect::new(b.right() - c, b.y, c, c),
        Rect::new(b.x, b.bottom() - c, c, c),
        Rect::new(b.right() - c, b.bottom() - c, c, c),
    ]
}
