//! Native bitmap loader built on the `image` crate.
//!
//! The browser build decodes through `HtmlImageElement` instead (see `web`);
//! both produce a `DecodedBitmap` that the engine places or caches.

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;

use std::sync::Arc;

use image::RgbaImage;

use crate::error::DecodeError;
use crate::scene::SourceRef;
use crate::viewport::Size;

/// A decoded bitmap together with its natural size and where it came from.
#[derive(Debug, Clone)]
pub struct DecodedBitmap<B> {
    pub width: u32,
    pub height: u32,
    pub bitmap: B,
    pub source: SourceRef,
}

impl<B> DecodedBitmap<B> {
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, BMP) to RGBA.
///
/// # Errors
///
/// Fails on unrecognized or corrupt data and on images with no pixels.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::Empty);
    }
    Ok(image)
}

/// Decode a source reference.
///
/// # Errors
///
/// URL sources need a host loader and fail with
/// `DecodeError::UnsupportedSource`. Byte sources fail as `decode_bytes` does.
pub fn decode_source(source: &SourceRef) -> Result<DecodedBitmap<Arc<RgbaImage>>, DecodeError> {
    match source {
        SourceRef::Bytes(bytes) => {
            let image = decode_bytes(bytes)?;
            Ok(DecodedBitmap {
                width: image.width(),
                height: image.height(),
                bitmap: Arc::new(image),
                source: source.clone(),
            })
        }
        SourceRef::Url(url) => Err(DecodeError::UnsupportedSource(url.clone())),
    }
}
