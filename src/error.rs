//! Error types for the engine's collaborator boundaries.
//!
//! None of these ever escape into the redraw loop: the engine logs them with
//! `tracing` at the point where they arrive and carries on.

/// Failure turning image bytes or a URL into a bitmap.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("image has zero size")]
    Empty,
    #[error("url sources are not supported by this loader: {0}")]
    UnsupportedSource(String),
    #[error("browser image load failed: {0}")]
    Browser(String),
}

/// Failure reading an image from the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard access denied")]
    Denied,
    #[error("clipboard holds no image")]
    NoImage,
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failure drawing to or reading from a surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("canvas call failed: {0}")]
    Canvas(String),
    #[error("surface context unavailable")]
    NoContext,
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Failure scheduling work on the host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no window available")]
    NoWindow,
    #[error("host call failed: {0}")]
    Call(String),
}

/// Invalid engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}
