//! Eyedropper: color sampling from the composed scene.
//!
//! A click samples the visible surface. Where the visible pixel is fully
//! transparent the virtual surface is tried at the same scene position, so the
//! background grid stays pickable. Hover previews are debounced by the engine
//! through a host timer and skip the read entirely when the pointer has not
//! moved far enough since the last sample.

#[cfg(test)]
#[path = "picker_test.rs"]
mod picker_test;

use crate::scheduler::TimerHandle;
use crate::surface::{Color, Surface};
use crate::viewport::{Point, Viewport};

/// Result of a color sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickedColor {
    /// Lowercase `#rrggbb`.
    Hex(String),
    /// Nothing drawn at the sampled position.
    Transparent,
}

impl PickedColor {
    #[must_use]
    pub fn as_hex(&self) -> Option<&str> {
        match self {
            PickedColor::Hex(hex) => Some(hex),
            PickedColor::Transparent => None,
        }
    }
}

fn opaque_at<S: Surface>(surface: &S, pt: Point) -> Option<Color> {
    match surface.pixel(pt.x.floor() as i64, pt.y.floor() as i64) {
        Ok(Some(color)) if !color.is_transparent() => Some(color),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "pixel read failed");
            None
        }
    }
}

/// Sample the color under `screen`, falling back to the virtual surface.
///
/// The fallback reads the virtual surface at the world position under
/// `screen`, so the pan offset is added before sampling. Out-of-bounds
/// positions and read failures give `Transparent`.
pub fn sample_color<S: Surface>(visible: &S, virtual_surface: &S, screen: Point, viewport: &Viewport) -> PickedColor {
    opaque_at(visible, screen)
        .or_else(|| opaque_at(virtual_surface, viewport.screen_to_virtual(screen)))
        .map_or(PickedColor::Transparent, |c| PickedColor::Hex(c.to_hex()))
}

/// Eyedropper mode and its preview state.
#[derive(Debug, Default)]
pub struct Eyedropper {
    active: bool,
    picked: Option<String>,
    preview: Option<PickedColor>,
    pointer: Point,
    last_sample: Option<Point>,
    timer: Option<TimerHandle>,
}

impl Eyedropper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last color picked by a click, as `#rrggbb`.
    #[must_use]
    pub fn picked(&self) -> Option<&str> {
        self.picked.as_deref()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&PickedColor> {
        self.preview.as_ref()
    }

    /// Last pointer position seen while active, in screen coordinates.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Flip the mode. Turning it off clears the preview. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_active(!self.active);
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.last_sample = None;
        } else {
            self.preview = None;
        }
    }

    pub fn track(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Remember the pending preview timer, returning the one it replaces.
    pub fn replace_timer(&mut self, timer: Option<TimerHandle>) -> Option<TimerHandle> {
        std::mem::replace(&mut self.timer, timer)
    }

    /// Claim the pending timer if `handle` is it.
    pub fn claim_timer(&mut self, handle: TimerHandle) -> bool {
        if self.timer == Some(handle) {
            self.timer = None;
            true
        } else {
            false
        }
    }

    /// Whether the pointer moved at least `min_move` on either axis since the
    /// last preview sample.
    #[must_use]
    pub fn moved_enough(&self, min_move: f64) -> bool {
        self.last_sample.is_none_or(|last| {
            (self.pointer.x - last.x).abs() >= min_move || (self.pointer.y - last.y).abs() >= min_move
        })
    }

    /// Re-sample the preview at the tracked pointer.
    ///
    /// Returns the new preview when it changed.
    pub fn resample<S: Surface>(
        &mut self,
        visible: &S,
        virtual_surface: &S,
        viewport: &Viewport,
        min_move: f64,
    ) -> Option<PickedColor> {
        if !self.active || !self.moved_enough(min_move) {
            return None;
        }
        self.last_sample = Some(self.pointer);
        let color = sample_color(visible, virtual_surface, self.pointer, viewport);
        if self.preview.as_ref() == Some(&color) {
            return None;
        }
        self.preview = Some(color.clone());
        Some(color)
    }

    /// Sample at `screen` for a click and leave eyedropper mode.
    ///
    /// Returns the color when something opaque was under the pointer.
    pub fn pick<S: Surface>(
        &mut self,
        visible: &S,
        virtual_surface: &S,
        screen: Point,
        viewport: &Viewport,
    ) -> Option<PickedColor> {
        let color = sample_color(visible, virtual_surface, screen, viewport);
        self.set_active(false);
        let hex = color.as_hex()?.to_string();
        self.picked = Some(hex);
        Some(color)
    }
}
