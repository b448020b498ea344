//! Scene model: placed images, their paint order, and the selection.
//!
//! `Scene` exclusively owns the ordered image list and the selection pointer.
//! Paint order is list order, so the last entry is the topmost image. Every
//! mutation goes through a method here, which keeps the minimum-size floor
//! and the selection invariant in one place and lets observers hear about it.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::MIN_IMAGE_SIZE;
use crate::viewport::{Point, Rect, Size};

/// Unique identifier for a placed image.
pub type ImageId = Uuid;

/// Where a placed image's pixels came from.
///
/// The bytes are shared, so duplicating an image never copies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// Encoded image bytes from a drop, paste, or file pick.
    Bytes(Arc<[u8]>),
    /// A URL the host can load.
    Url(String),
}

impl SourceRef {
    #[must_use]
    pub fn bytes(data: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(data.into())
    }
}

/// A single visual filter applied to one image at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    Grayscale,
    Sepia,
    Blur,
    #[serde(alias = "brightness")]
    Brighten,
    Contrast,
    Saturate,
    HueRotate,
}

impl Effect {
    pub const ALL: [Effect; 7] = [
        Effect::Grayscale,
        Effect::Sepia,
        Effect::Blur,
        Effect::Brighten,
        Effect::Contrast,
        Effect::Saturate,
        Effect::HueRotate,
    ];
}

/// One image on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    /// Assigned at creation, never changes.
    pub id: ImageId,
    pub source: SourceRef,
    /// Left edge in virtual-surface coordinates.
    pub x: f64,
    /// Top edge in virtual-surface coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// In `[0, 1]`.
    pub opacity: f64,
    /// Blocks drag. Resize still works.
    pub pinned: bool,
    pub effect: Option<Effect>,
}

impl PlacedImage {
    /// A fresh image with default flags and a newly generated id.
    #[must_use]
    pub fn new(source: SourceRef, rect: Rect) -> Self {
        let mut image = Self {
            id: Uuid::new_v4(),
            source,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            flip_horizontal: false,
            flip_vertical: false,
            opacity: 1.0,
            pinned: false,
            effect: None,
        };
        image.normalize();
        image
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Move and resize in one step. The size floor still applies.
    pub fn set_bounds(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
        self.normalize();
    }

    fn normalize(&mut self) {
        self.width = floor_size(self.width);
        self.height = floor_size(self.height);
        self.opacity = if self.opacity.is_nan() { 0.0 } else { self.opacity.clamp(0.0, 1.0) };
    }
}

fn floor_size(v: f64) -> f64 {
    if v.is_nan() { MIN_IMAGE_SIZE } else { v.max(MIN_IMAGE_SIZE) }
}

/// Notification emitted after each scene mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Added(ImageId),
    Removed(ImageId),
    Updated(ImageId),
    Reordered(ImageId),
    SelectionChanged(Option<ImageId>),
}

type Observer = Box<dyn FnMut(&SceneEvent)>;

/// Ordered collection of placed images plus at most one selected id.
#[derive(Default)]
pub struct Scene {
    images: Vec<PlacedImage>,
    selected: Option<ImageId>,
    observers: Vec<Observer>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("images", &self.images)
            .field("selected", &self.selected)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer called after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&SceneEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: SceneEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    // --- Queries ---

    /// All images in paint order, bottom first.
    #[must_use]
    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ImageId) -> Option<&PlacedImage> {
        self.images.iter().find(|image| image.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ImageId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn index_of(&self, id: &ImageId) -> Option<usize> {
        self.images.iter().position(|image| image.id == *id)
    }

    /// The selected id, or `None` when nothing is selected or the id is stale.
    #[must_use]
    pub fn selected_id(&self) -> Option<ImageId> {
        self.selected.filter(|id| self.contains(id))
    }

    /// The selected image, resolving a stale id to `None`.
    #[must_use]
    pub fn selected(&self) -> Option<&PlacedImage> {
        self.selected.and_then(|id| self.get(&id))
    }

    // --- Mutations ---

    /// Append an image on top. Returns `false` if its id is already present.
    pub fn add(&mut self, mut image: PlacedImage) -> bool {
        if self.contains(&image.id) {
            tracing::warn!(id = %image.id, "image id already in scene; ignoring add");
            return false;
        }
        image.normalize();
        let id = image.id;
        self.images.push(image);
        self.emit(SceneEvent::Added(id));
        true
    }

    /// Remove an image, clearing the selection if it pointed there.
    ///
    /// Unknown ids are ignored.
    pub fn remove(&mut self, id: &ImageId) -> Option<PlacedImage> {
        let index = self.index_of(id)?;
        let removed = self.images.remove(index);
        self.emit(SceneEvent::Removed(removed.id));
        if self.selected == Some(removed.id) {
            self.selected = None;
            self.emit(SceneEvent::SelectionChanged(None));
        }
        Some(removed)
    }

    /// Set or clear the selection. The id is not checked here; lookups treat
    /// an unknown id as no selection.
    pub fn select(&mut self, id: Option<ImageId>) {
        if self.selected == id {
            return;
        }
        self.selected = id;
        self.emit(SceneEvent::SelectionChanged(id));
    }

    /// Swap with the next image up. No-op at the top or for unknown ids.
    pub fn bring_forward(&mut self, id: &ImageId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index + 1 >= self.images.len() {
            return false;
        }
        self.images.swap(index, index + 1);
        self.emit(SceneEvent::Reordered(*id));
        true
    }

    /// Swap with the next image down. No-op at the bottom or for unknown ids.
    pub fn send_backward(&mut self, id: &ImageId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        self.images.swap(index, index - 1);
        self.emit(SceneEvent::Reordered(*id));
        true
    }

    /// Apply `f` to one image in place, then re-apply the size floor.
    ///
    /// The id cannot be changed through this path.
    pub fn mutate(&mut self, id: &ImageId, f: impl FnOnce(&mut PlacedImage)) -> bool {
        let Some(image) = self.images.iter_mut().find(|image| image.id == *id) else {
            return false;
        };
        let original = image.id;
        f(image);
        image.id = original;
        image.normalize();
        self.emit(SceneEvent::Updated(original));
        true
    }

    /// Apply `f` to the selected image. No-op when nothing is selected.
    pub fn mutate_selected(&mut self, f: impl FnOnce(&mut PlacedImage)) -> bool {
        match self.selected_id() {
            Some(id) => self.mutate(&id, f),
            None => false,
        }
    }
}
