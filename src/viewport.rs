//! Coordinate primitives and the viewport onto the virtual surface.
//!
//! Scene geometry lives in virtual-surface space. The visible surface shows a
//! window of that space whose top-left corner sits at the pan offset, so
//! converting from screen to virtual coordinates is a pure translation.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or virtual-surface space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum `self + other`.
    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment: points on the boundary count as inside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }
}

/// The visible window onto the virtual surface.
///
/// `pan_x` / `pan_y` locate the viewport's top-left corner in virtual-surface
/// units; `width` / `height` are the visible surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, width: 0.0, height: 0.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// A viewport of the given size, panned so it sits in the middle of `extent`.
    #[must_use]
    pub fn centered_in(width: f64, height: f64, extent: Size) -> Self {
        let mut viewport = Self::new(width, height);
        viewport.pan_x = (extent.width - width) / 2.0;
        viewport.pan_y = (extent.height - height) / 2.0;
        viewport.clamp_to(extent);
        viewport
    }

    /// Convert a screen-space point to virtual-surface coordinates.
    #[must_use]
    pub fn screen_to_virtual(&self, screen: Point) -> Point {
        Point::new(screen.x + self.pan_x, screen.y + self.pan_y)
    }

    /// Convert a virtual-surface point to screen coordinates.
    #[must_use]
    pub fn virtual_to_screen(&self, world: Point) -> Point {
        Point::new(world.x - self.pan_x, world.y - self.pan_y)
    }

    /// Center of the visible area, in virtual-surface coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.pan_x + self.width / 2.0, self.pan_y + self.height / 2.0)
    }

    /// The region of the virtual surface currently shown.
    #[must_use]
    pub fn source_rect(&self) -> Rect {
        Rect::new(self.pan_x, self.pan_y, self.width, self.height)
    }

    /// Keep the viewport inside `extent` on each axis where the extent is larger.
    ///
    /// On an axis where the viewport is at least as large as the extent the pan
    /// is pinned to zero.
    pub fn clamp_to(&mut self, extent: Size) {
        self.pan_x = clamp_axis(self.pan_x, self.width, extent.width);
        self.pan_y = clamp_axis(self.pan_y, self.height, extent.height);
    }
}

fn clamp_axis(pan: f64, visible: f64, extent: f64) -> f64 {
    let max = extent - visible;
    if max <= 0.0 {
        return 0.0;
    }
    pan.clamp(0.0, max)
}
