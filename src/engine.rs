//! Interaction controller and engine shell.
//!
//! `EngineCore` holds everything that does not need a drawing surface or a
//! host: the scene, the bitmap cache, the viewport, the pointer session, and
//! the eyedropper state. Its handlers return `Vec<Action>` for the caller to
//! act on. `Engine` wraps a core together with the virtual and visible
//! surfaces, the frame host, and the redraw scheduler, and turns
//! `RenderNeeded` into coalesced render passes.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::cache::ImageCache;
use crate::config::EngineConfig;
use crate::decode::DecodedBitmap;
use crate::error::{ClipboardError, DecodeError, SurfaceError};
use crate::hit::{self, Hit};
use crate::input::{Button, CursorStyle, InteractionState, Key, Modifiers};
use crate::picker::{Eyedropper, PickedColor};
use crate::render;
use crate::scene::{Effect, ImageId, PlacedImage, Scene, SourceRef};
use crate::scheduler::{FrameHandle, FrameHost, RedrawRequest, RedrawScheduler, TimerHandle};
use crate::surface::Surface;
use crate::transform;
use crate::viewport::{Point, Rect, Viewport};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The scene or viewport changed. `Engine` consumes this itself.
    RenderNeeded,
    SetCursor(CursorStyle),
    /// A placed image has no cached bitmap. Answer with
    /// `Engine::on_bitmap_decoded`.
    DecodeRequested { id: ImageId, source: SourceRef },
    /// Read an image from the clipboard and answer with
    /// `Engine::on_clipboard_image`.
    ClipboardReadRequested,
    ColorPicked(PickedColor),
    PreviewColor(PickedColor),
    /// Eyedropper pointer position in screen coordinates.
    EyedropperMoved(Point),
    ImageAdded(ImageId),
}

/// Where a newly placed image goes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    /// Centered in the visible part of the board.
    #[default]
    ViewportCenter,
    /// Centered on a screen-space point, such as a drop position.
    At(Point),
}

/// Core engine state: all logic that doesn't need a surface or a host.
#[derive(Debug)]
pub struct EngineCore<B> {
    pub scene: Scene,
    pub cache: ImageCache<B>,
    pub viewport: Viewport,
    pub interaction: InteractionState,
    pub cursor: CursorStyle,
    pub eyedropper: Eyedropper,
    pub config: EngineConfig,
}

impl<B: Clone> EngineCore<B> {
    /// A core with an empty scene and a viewport of the given size.
    #[must_use]
    pub fn new(config: EngineConfig, viewport_width: f64, viewport_height: f64) -> Self {
        let viewport = if config.center_initial_pan {
            Viewport::centered_in(viewport_width, viewport_height, config.virtual_size())
        } else {
            Viewport::new(viewport_width, viewport_height)
        };
        Self {
            scene: Scene::new(),
            cache: ImageCache::new(),
            viewport,
            interaction: InteractionState::Idle,
            cursor: CursorStyle::Default,
            eyedropper: Eyedropper::new(),
            config,
        }
    }

    // --- Queries ---

    /// The selected image, for display by the surrounding UI.
    #[must_use]
    pub fn selected_image(&self) -> Option<&PlacedImage> {
        self.scene.selected()
    }

    #[must_use]
    pub fn selection(&self) -> Option<ImageId> {
        self.scene.selected_id()
    }

    fn set_cursor(&mut self, cursor: CursorStyle, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    /// Cursor for an idle pointer at `world`.
    fn hover_cursor(&self, world: Point) -> CursorStyle {
        let Some(image) = hit::hit_test(world, self.scene.images()) else {
            return CursorStyle::Default;
        };
        if self.scene.selected_id() != Some(image.id) {
            return CursorStyle::Grab;
        }
        match hit::classify_handle(world, image) {
            Some(handle) => CursorStyle::for_handle(handle),
            None if image.pinned => CursorStyle::NotAllowed,
            None => CursorStyle::Grab,
        }
    }

    // --- Pointer input ---

    /// Pointer pressed at a screen position.
    ///
    /// While the eyedropper is active this does nothing: `Engine` samples the
    /// surfaces before delegating here, and a pick never hit-tests.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if button != Button::Primary || self.eyedropper.is_active() {
            return actions;
        }
        let world = self.viewport.screen_to_virtual(screen);
        let previous = self.scene.selected_id();

        let Some(Hit { id, handle }) = hit::pick(world, self.scene.images()) else {
            self.interaction = InteractionState::Idle;
            self.scene.select(None);
            if previous.is_some() {
                actions.push(Action::RenderNeeded);
            }
            self.set_cursor(CursorStyle::Default, &mut actions);
            return actions;
        };
        let Some((position, size, pinned)) = self.scene.get(&id).map(|i| (i.position(), i.size(), i.pinned)) else {
            return actions;
        };

        self.scene.select(Some(id));
        let cursor = if let Some(handle) = handle {
            self.interaction = InteractionState::Resizing {
                id,
                handle,
                anchor_pos: position,
                anchor_size: size,
                pointer_start: world,
            };
            CursorStyle::for_handle(handle)
        } else if pinned {
            self.interaction = InteractionState::Idle;
            CursorStyle::NotAllowed
        } else {
            self.interaction = InteractionState::Dragging { id, offset: world.sub(position) };
            CursorStyle::Grabbing
        };

        if previous != Some(id) || !self.interaction.is_idle() {
            actions.push(Action::RenderNeeded);
        }
        self.set_cursor(cursor, &mut actions);
        actions
    }

    /// Pointer moved to a screen position.
    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.eyedropper.is_active() {
            self.eyedropper.track(screen);
            actions.push(Action::EyedropperMoved(screen));
            return actions;
        }
        let world = self.viewport.screen_to_virtual(screen);

        match self.interaction {
            InteractionState::Resizing { id, handle, anchor_pos, anchor_size, pointer_start } => {
                let rect = transform::resize(handle, anchor_pos, anchor_size, pointer_start, world);
                if self.scene.mutate(&id, |image| image.set_bounds(rect)) {
                    actions.push(Action::RenderNeeded);
                } else {
                    self.interaction = InteractionState::Idle;
                }
            }
            InteractionState::Dragging { id, offset } => match self.scene.get(&id).map(|image| image.pinned) {
                None => self.interaction = InteractionState::Idle,
                Some(true) => {}
                Some(false) => {
                    let to = world.sub(offset);
                    self.scene.mutate(&id, |image| {
                        image.x = to.x;
                        image.y = to.y;
                    });
                    actions.push(Action::RenderNeeded);
                }
            },
            InteractionState::Idle => {
                let cursor = self.hover_cursor(world);
                self.set_cursor(cursor, &mut actions);
            }
        }
        actions
    }

    /// Pointer released. Always ends the session.
    pub fn on_pointer_up(&mut self, _screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        self.interaction = InteractionState::Idle;
        if !self.eyedropper.is_active() {
            self.set_cursor(CursorStyle::Default, &mut actions);
        }
        actions
    }

    // --- Keyboard input ---

    /// Delete/Backspace removes the selection, Ctrl/Cmd+V pastes, Shift+H and
    /// Shift+V flip the selection.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            if key.is_letter('v') {
                return vec![Action::ClipboardReadRequested];
            }
            return Vec::new();
        }
        if key.is_delete() {
            return self.delete_selected();
        }
        if modifiers.shift && key.is_letter('h') {
            return self.flip_horizontal();
        }
        if modifiers.shift && key.is_letter('v') {
            return self.flip_vertical();
        }
        Vec::new()
    }

    // --- Selection operations ---

    fn render_if(changed: bool) -> Vec<Action> {
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn flip_horizontal(&mut self) -> Vec<Action> {
        Self::render_if(self.scene.mutate_selected(transform::flip_horizontal))
    }

    pub fn flip_vertical(&mut self) -> Vec<Action> {
        Self::render_if(self.scene.mutate_selected(transform::flip_vertical))
    }

    pub fn set_opacity(&mut self, opacity: f64) -> Vec<Action> {
        Self::render_if(self.scene.mutate_selected(|image| transform::set_opacity(image, opacity)))
    }

    pub fn toggle_pin(&mut self) -> Vec<Action> {
        Self::render_if(self.scene.mutate_selected(transform::toggle_pin))
    }

    /// Apply `effect` to the selection, or clear it if already active.
    pub fn set_effect(&mut self, effect: Effect) -> Vec<Action> {
        Self::render_if(self.scene.mutate_selected(|image| transform::toggle_effect(image, effect)))
    }

    pub fn bring_forward(&mut self) -> Vec<Action> {
        let changed = self.scene.selected_id().is_some_and(|id| self.scene.bring_forward(&id));
        Self::render_if(changed)
    }

    pub fn send_backward(&mut self) -> Vec<Action> {
        let changed = self.scene.selected_id().is_some_and(|id| self.scene.send_backward(&id));
        Self::render_if(changed)
    }

    /// Remove the selected image and its cached bitmap.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.scene.selected_id() else {
            return Vec::new();
        };
        self.scene.remove(&id);
        self.cache.evict(&id);
        if self.interaction.target() == Some(id) {
            self.interaction = InteractionState::Idle;
        }
        vec![Action::RenderNeeded]
    }

    /// Copy the selection on top, offset by the configured amount, and select
    /// the copy. The copy shares the original's bitmap.
    pub fn duplicate_selected(&mut self) -> Vec<Action> {
        let Some(original) = self.scene.selected() else {
            return Vec::new();
        };
        let offset = self.config.duplicate_offset;
        let copy = transform::duplicate(original, Point::new(offset, offset));
        let (from, id) = (original.id, copy.id);
        if !self.scene.add(copy) {
            return Vec::new();
        }
        self.cache.share(&from, id);
        self.scene.select(Some(id));
        vec![Action::ImageAdded(id), Action::RenderNeeded]
    }

    /// Flip eyedropper mode.
    pub fn toggle_eyedropper(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        let cursor = if self.eyedropper.toggle() {
            self.interaction = InteractionState::Idle;
            CursorStyle::Crosshair
        } else {
            CursorStyle::Default
        };
        self.set_cursor(cursor, &mut actions);
        actions
    }

    // --- Placement ---

    /// Add a decoded bitmap as a new image.
    ///
    /// A failed decode is logged and adds nothing.
    pub fn place_bitmap(
        &mut self,
        decoded: Result<DecodedBitmap<B>, DecodeError>,
        placement: Placement,
        auto_select: bool,
    ) -> Vec<Action> {
        let decoded = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(error = %e, "dropping image that failed to decode");
                return Vec::new();
            }
        };
        let center = match placement {
            Placement::ViewportCenter => self.viewport.center(),
            Placement::At(screen) => self.viewport.screen_to_virtual(screen),
        };
        let size = decoded.size();
        let rect = Rect::new(center.x - size.width / 2.0, center.y - size.height / 2.0, size.width, size.height);
        let image = PlacedImage::new(decoded.source, rect);
        let id = image.id;
        if !self.scene.add(image) {
            return Vec::new();
        }
        self.cache.put(id, decoded.bitmap);
        if auto_select {
            self.scene.select(Some(id));
        }
        tracing::debug!(%id, width = size.width, height = size.height, "image placed");
        vec![Action::ImageAdded(id), Action::RenderNeeded]
    }

    // --- Viewport ---

    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport.width = width.max(1.0);
        self.viewport.height = height.max(1.0);
        self.viewport.clamp_to(self.config.virtual_size());
        vec![Action::RenderNeeded]
    }

    /// Set the pan offset, clamped to the virtual surface.
    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) -> Vec<Action> {
        self.viewport.pan_x = pan_x;
        self.viewport.pan_y = pan_y;
        self.viewport.clamp_to(self.config.virtual_size());
        vec![Action::RenderNeeded]
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.set_pan(self.viewport.pan_x + dx, self.viewport.pan_y + dy)
    }
}

/// The full engine. Wraps `EngineCore` and owns the surfaces and the host.
pub struct Engine<S: Surface, H: FrameHost> {
    virtual_surface: S,
    visible: S,
    host: H,
    scheduler: RedrawScheduler,
    pub core: EngineCore<S::Bitmap>,
}

impl<S: Surface, H: FrameHost> Engine<S, H> {
    /// Bind an engine to its two surfaces. The virtual surface is resized to
    /// the configured extent; the viewport takes the visible surface's size.
    ///
    /// # Errors
    ///
    /// Returns the surface error if the virtual surface cannot be resized.
    pub fn new(mut virtual_surface: S, visible: S, host: H, config: EngineConfig) -> Result<Self, SurfaceError> {
        virtual_surface.resize(config.virtual_width, config.virtual_height)?;
        let core = EngineCore::new(config, f64::from(visible.width()), f64::from(visible.height()));
        Ok(Self { virtual_surface, visible, host, scheduler: RedrawScheduler::new(), core })
    }

    // --- Accessors ---

    #[must_use]
    pub fn visible(&self) -> &S {
        &self.visible
    }

    #[must_use]
    pub fn virtual_surface(&self) -> &S {
        &self.virtual_surface
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    // --- Rendering ---

    /// Consume `RenderNeeded` and pass the rest through for the host.
    fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut out = Vec::with_capacity(actions.len());
        let mut render = false;
        for action in actions {
            if action == Action::RenderNeeded {
                render = true;
            } else {
                out.push(action);
            }
        }
        if render {
            out.extend(self.request_redraw());
        }
        out
    }

    /// Ask for a render pass on the next frame. Requests between two frames
    /// collapse into one pass.
    pub fn request_redraw(&mut self) -> Vec<Action> {
        match self.scheduler.request_redraw(&mut self.host) {
            RedrawRequest::RunNow => self.render_pass(),
            RedrawRequest::Queued(_) | RedrawRequest::AlreadyPending => Vec::new(),
        }
    }

    /// Frame callback from the host.
    pub fn on_frame(&mut self, handle: FrameHandle) -> Vec<Action> {
        if self.scheduler.on_frame(handle) { self.render_pass() } else { Vec::new() }
    }

    /// Compose, request decodes for cache misses, and present once no decode
    /// is outstanding.
    fn render_pass(&mut self) -> Vec<Action> {
        let core = &mut self.core;
        let missing = match render::compose(&mut self.virtual_surface, &core.scene, &core.cache, core.config.grid_period)
        {
            Ok(missing) => missing,
            Err(e) => {
                tracing::warn!(error = %e, "compose failed");
                return Vec::new();
            }
        };

        let mut actions = Vec::new();
        for id in missing {
            if !core.cache.begin_decode(id) {
                continue;
            }
            if let Some(image) = core.scene.get(&id) {
                actions.push(Action::DecodeRequested { id, source: image.source.clone() });
            }
        }

        if core.cache.pending_count() == 0 {
            if let Err(e) = render::present(&mut self.visible, &self.virtual_surface, &core.viewport) {
                tracing::warn!(error = %e, "present failed");
            }
        }
        actions
    }

    // --- Async completions ---

    /// A bitmap requested through `DecodeRequested` finished loading.
    pub fn on_bitmap_decoded(
        &mut self,
        id: ImageId,
        result: Result<DecodedBitmap<S::Bitmap>, DecodeError>,
    ) -> Vec<Action> {
        if !self.core.scene.contains(&id) {
            tracing::debug!(%id, "decode finished for an image no longer on the board");
            self.core.cache.evict(&id);
            return self.request_redraw();
        }
        match result {
            Ok(decoded) => {
                self.core.cache.put(id, decoded.bitmap);
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "image decode failed");
                self.core.cache.fail(id);
            }
        }
        self.request_redraw()
    }

    /// Answer to `ClipboardReadRequested`. Pasted images are centered and
    /// selected.
    pub fn on_clipboard_image(&mut self, result: Result<DecodedBitmap<S::Bitmap>, ClipboardError>) -> Vec<Action> {
        match result {
            Ok(decoded) => self.place_bitmap(Ok(decoded), Placement::ViewportCenter, true),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard read failed");
                Vec::new()
            }
        }
    }

    /// A dropped or picked file finished decoding.
    pub fn on_drop(&mut self, result: Result<DecodedBitmap<S::Bitmap>, DecodeError>, placement: Placement) -> Vec<Action> {
        let auto_select = self.core.config.auto_select_dropped;
        self.place_bitmap(result, placement, auto_select)
    }

    pub fn place_bitmap(
        &mut self,
        result: Result<DecodedBitmap<S::Bitmap>, DecodeError>,
        placement: Placement,
        auto_select: bool,
    ) -> Vec<Action> {
        let actions = self.core.place_bitmap(result, placement, auto_select);
        self.dispatch(actions)
    }

    /// Preview timer fired.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Vec<Action> {
        if !self.core.eyedropper.claim_timer(handle) {
            tracing::debug!(handle = handle.0, "ignoring stale preview timer");
            return Vec::new();
        }
        self.sample_preview()
    }

    fn sample_preview(&mut self) -> Vec<Action> {
        let min_move = self.core.config.color_sample_min_move;
        self.core
            .eyedropper
            .resample(&self.visible, &self.virtual_surface, &self.core.viewport, min_move)
            .map(Action::PreviewColor)
            .into_iter()
            .collect()
    }

    /// Restart the preview debounce, superseding any pending timer.
    fn schedule_preview(&mut self) -> Vec<Action> {
        self.cancel_preview();
        match self.host.set_timer(self.core.config.color_sample_interval_ms) {
            Ok(handle) => {
                self.core.eyedropper.replace_timer(Some(handle));
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "preview timer failed; sampling now");
                self.sample_preview()
            }
        }
    }

    fn cancel_preview(&mut self) {
        if let Some(handle) = self.core.eyedropper.replace_timer(None) {
            self.host.cancel_timer(handle);
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button == Button::Primary && self.core.eyedropper.is_active() {
            return self.pick_color(screen);
        }
        let actions = self.core.on_pointer_down(screen, button, modifiers);
        self.dispatch(actions)
    }

    fn pick_color(&mut self, screen: Point) -> Vec<Action> {
        self.cancel_preview();
        let core = &mut self.core;
        let picked = core.eyedropper.pick(&self.visible, &self.virtual_surface, screen, &core.viewport);
        let mut actions: Vec<Action> = picked.map(Action::ColorPicked).into_iter().collect();
        core.set_cursor(CursorStyle::Default, &mut actions);
        actions
    }

    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.core.on_pointer_move(screen, modifiers);
        if self.core.eyedropper.is_active() {
            actions.extend(self.schedule_preview());
        }
        self.dispatch(actions)
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_pointer_up(screen, button, modifiers);
        self.dispatch(actions)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_key_down(key, modifiers);
        self.dispatch(actions)
    }

    // --- Delegated operations ---

    pub fn flip_horizontal(&mut self) -> Vec<Action> {
        let actions = self.core.flip_horizontal();
        self.dispatch(actions)
    }

    pub fn flip_vertical(&mut self) -> Vec<Action> {
        let actions = self.core.flip_vertical();
        self.dispatch(actions)
    }

    pub fn set_opacity(&mut self, opacity: f64) -> Vec<Action> {
        let actions = self.core.set_opacity(opacity);
        self.dispatch(actions)
    }

    pub fn toggle_pin(&mut self) -> Vec<Action> {
        let actions = self.core.toggle_pin();
        self.dispatch(actions)
    }

    pub fn set_effect(&mut self, effect: Effect) -> Vec<Action> {
        let actions = self.core.set_effect(effect);
        self.dispatch(actions)
    }

    pub fn bring_forward(&mut self) -> Vec<Action> {
        let actions = self.core.bring_forward();
        self.dispatch(actions)
    }

    pub fn send_backward(&mut self) -> Vec<Action> {
        let actions = self.core.send_backward();
        self.dispatch(actions)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        let actions = self.core.delete_selected();
        self.dispatch(actions)
    }

    pub fn duplicate_selected(&mut self) -> Vec<Action> {
        let actions = self.core.duplicate_selected();
        self.dispatch(actions)
    }

    pub fn toggle_eyedropper(&mut self) -> Vec<Action> {
        let actions = self.core.toggle_eyedropper();
        if !self.core.eyedropper.is_active() {
            self.cancel_preview();
        }
        self.dispatch(actions)
    }

    // --- Viewport ---

    /// The visible surface changed size, e.g. on window resize.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) -> Vec<Action> {
        let (width, height) = (width.max(1), height.max(1));
        if let Err(e) = self.visible.resize(width, height) {
            tracing::warn!(error = %e, width, height, "visible surface resize failed");
        }
        let actions = self.core.set_viewport_size(f64::from(width), f64::from(height));
        self.dispatch(actions)
    }

    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) -> Vec<Action> {
        let actions = self.core.set_pan(pan_x, pan_y);
        self.dispatch(actions)
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        let actions = self.core.pan_by(dx, dy);
        self.dispatch(actions)
    }

    // --- Teardown ---

    /// Cancel the queued frame and the preview timer. Callbacks that still
    /// arrive afterwards are ignored.
    pub fn teardown(&mut self) {
        self.scheduler.teardown(&mut self.host);
        self.cancel_preview();
    }
}
