//! Input model: modifier keys, mouse buttons, keys, cursor hints, and the
//! drag/resize session tracked between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::hit::ResizeHandle;
use crate::scene::ImageId;
use crate::viewport::{Point, Size};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as the browser reports it in `KeyboardEvent.key`
/// (e.g. `"Delete"`, `"H"`, `"v"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Case-insensitive comparison for single-letter keys.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete" || self.0 == "Backspace"
    }
}

/// Cursor hint for the host to apply to the canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    Grab,
    Grabbing,
    NotAllowed,
    NwseResize,
    NeswResize,
    EwResize,
    NsResize,
}

impl CursorStyle {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Crosshair => "crosshair",
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
            CursorStyle::NotAllowed => "not-allowed",
            CursorStyle::NwseResize => "nwse-resize",
            CursorStyle::NeswResize => "nesw-resize",
            CursorStyle::EwResize => "ew-resize",
            CursorStyle::NsResize => "ns-resize",
        }
    }

    /// Resize cursor for a handle.
    #[must_use]
    pub fn for_handle(handle: ResizeHandle) -> Self {
        match handle {
            ResizeHandle::Nw | ResizeHandle::Se => CursorStyle::NwseResize,
            ResizeHandle::Ne | ResizeHandle::Sw => CursorStyle::NeswResize,
            ResizeHandle::W | ResizeHandle::E => CursorStyle::EwResize,
            ResizeHandle::N | ResizeHandle::S => CursorStyle::NsResize,
        }
    }
}

/// The pointer session in progress, if any.
///
/// Coordinates are in virtual-surface space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Moving an image with the pointer.
    Dragging {
        id: ImageId,
        /// Pointer position minus the image's top-left at pointer-down.
        offset: Point,
    },
    /// Resizing an image from one of its eight handles.
    Resizing {
        id: ImageId,
        handle: ResizeHandle,
        anchor_pos: Point,
        anchor_size: Size,
        pointer_start: Point,
    },
}

impl InteractionState {
    /// The image the session acts on.
    #[must_use]
    pub fn target(&self) -> Option<ImageId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging { id, .. } | InteractionState::Resizing { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}
