//! Hit-testing and resize-handle classification.
//!
//! All coordinates are in virtual-surface space. Bounds are inclusive on every
//! side, so a point exactly on an image's edge hits that image.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{CORNER_THRESHOLD, EDGE_THRESHOLD};
use crate::scene::{ImageId, PlacedImage};
use crate::viewport::Point;

/// One of the eight resize zones on an image's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Nw,
    Ne,
    Sw,
    Se,
    W,
    E,
    N,
    S,
}

impl ResizeHandle {
    /// Corner handles resize uniformly; edge handles resize one axis.
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Nw | Self::Ne | Self::Sw | Self::Se)
    }
}

/// An image under the pointer and the handle zone the pointer is in, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ImageId,
    pub handle: Option<ResizeHandle>,
}

/// The topmost image containing `pt`, scanning from the end of the list.
#[must_use]
pub fn hit_test(pt: Point, images: &[PlacedImage]) -> Option<&PlacedImage> {
    images.iter().rev().find(|image| image.bounds().contains(pt))
}

/// Which resize zone of `image` contains `pt`.
///
/// Corner squares are checked first, in the order nw, ne, sw, se, so a point
/// in both a corner and an edge zone is always a corner. Edge strips follow in
/// the order w, e, n, s. Interior points and points outside the image give
/// `None`.
#[must_use]
pub fn classify_handle(pt: Point, image: &PlacedImage) -> Option<ResizeHandle> {
    let bounds = image.bounds();
    if !bounds.contains(pt) {
        return None;
    }

    let near_left = pt.x <= bounds.x + CORNER_THRESHOLD;
    let near_right = pt.x >= bounds.right() - CORNER_THRESHOLD;
    let near_top = pt.y <= bounds.y + CORNER_THRESHOLD;
    let near_bottom = pt.y >= bounds.bottom() - CORNER_THRESHOLD;

    if near_left && near_top {
        return Some(ResizeHandle::Nw);
    }
    if near_right && near_top {
        return Some(ResizeHandle::Ne);
    }
    if near_left && near_bottom {
        return Some(ResizeHandle::Sw);
    }
    if near_right && near_bottom {
        return Some(ResizeHandle::Se);
    }

    if pt.x <= bounds.x + EDGE_THRESHOLD {
        return Some(ResizeHandle::W);
    }
    if pt.x >= bounds.right() - EDGE_THRESHOLD {
        return Some(ResizeHandle::E);
    }
    if pt.y <= bounds.y + EDGE_THRESHOLD {
        return Some(ResizeHandle::N);
    }
    if pt.y >= bounds.bottom() - EDGE_THRESHOLD {
        return Some(ResizeHandle::S);
    }
    None
}

/// Hit-test and classify in one pass.
#[must_use]
pub fn pick(pt: Point, images: &[PlacedImage]) -> Option<Hit> {
    let image = hit_test(pt, images)?;
    Some(Hit { id: image.id, handle: classify_handle(pt, image) })
}
