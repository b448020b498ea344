//! Shared constants for the moodboard crate.

use crate::surface::Color;

// ── Geometry ────────────────────────────────────────────────────

/// Width of the edge resize zones, measured inward from each side.
pub const EDGE_THRESHOLD: f64 = 15.0;

/// Side of the square corner resize zones.
pub const CORNER_THRESHOLD: f64 = 30.0;

/// Floor applied to every image width and height, on every mutation path.
pub const MIN_IMAGE_SIZE: f64 = 20.0;

/// Default offset applied to both axes when duplicating an image.
pub const DUPLICATE_OFFSET: f64 = 20.0;

// ── Virtual surface ─────────────────────────────────────────────

/// Default virtual surface width in units.
pub const VIRTUAL_WIDTH: u32 = 5000;

/// Default virtual surface height in units.
pub const VIRTUAL_HEIGHT: u32 = 5000;

/// Distance between background grid lines.
pub const GRID_PERIOD: f64 = 50.0;

/// Thickness of a background grid line.
pub const GRID_LINE_WIDTH: f64 = 1.0;

/// Background grid line color, `#dddddd`.
pub const GRID_COLOR: Color = Color::rgb(0xdd, 0xdd, 0xdd);

// ── Selection decorations ───────────────────────────────────────

/// Outline width of the dashed selection rectangle.
pub const SELECTION_LINE_WIDTH: f64 = 2.0;

/// Dash and gap length of the selection rectangle.
pub const SELECTION_DASH: f64 = 5.0;

/// Dash and gap length of the edge zone outlines.
pub const HANDLE_DASH: f64 = 3.0;

/// Distance of the pin badge center from the image's right edge.
pub const PIN_BADGE_INSET_X: f64 = 20.0;

/// Distance of the pin badge center below the image's top edge.
pub const PIN_BADGE_INSET_Y: f64 = 5.0;

/// Radius of the pin badge disc.
pub const PIN_BADGE_RADIUS: f64 = 8.0;

/// Outline width of the pin badge ring.
pub const PIN_BADGE_OUTLINE_WIDTH: f64 = 2.0;

/// Glyph drawn inside the pin badge.
pub const PIN_GLYPH: &str = "\u{1f4cc}";

/// Selection outline and handle color.
pub const SELECTION_COLOR: Color = Color::rgb(0xff, 0x00, 0x00);

/// Selection outline and badge color for pinned images.
pub const PINNED_COLOR: Color = Color::rgb(0xff, 0xa5, 0x00);

/// Corner zone highlight, red at 20% alpha.
pub const CORNER_HIGHLIGHT: Color = Color::rgba(0xff, 0x00, 0x00, 51);

/// Pin badge ring color.
pub const BADGE_OUTLINE_COLOR: Color = Color::rgb(0xff, 0xff, 0xff);

// ── Eyedropper ──────────────────────────────────────────────────

/// Debounce interval for hover color sampling (one frame at 60 Hz).
pub const COLOR_SAMPLE_INTERVAL_MS: u32 = 16;

/// Minimum pointer travel on either axis before a hover resample.
pub const COLOR_SAMPLE_MIN_MOVE: f64 = 2.0;
