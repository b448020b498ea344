//! Browser bindings: a `Surface` over a 2D canvas context, a `FrameHost` over
//! `requestAnimationFrame` and `setTimeout`, and an image loader over
//! `HtmlImageElement`.
//!
//! Callbacks from the browser arrive through the boxed functions handed to
//! `BrowserFrameHost::new` and `load_image`. Wiring those back into an
//! `Engine` is left to the page glue.

use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Blob, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url, Window};

use crate::decode::DecodedBitmap;
use crate::error::{DecodeError, HostError, SurfaceError};
use crate::filter;
use crate::scene::SourceRef;
use crate::scheduler::{FrameHandle, FrameHost, TimerHandle};
use crate::surface::{Color, ImagePaint, StrokeStyle, Surface};
use crate::viewport::{Point, Rect};

fn canvas_err(e: JsValue) -> SurfaceError {
    SurfaceError::Canvas(format!("{e:?}"))
}

fn host_err(e: JsValue) -> HostError {
    HostError::Call(format!("{e:?}"))
}

fn browser_err(e: JsValue) -> DecodeError {
    DecodeError::Browser(format!("{e:?}"))
}

// =============================================================
// Canvas surface
// =============================================================

/// `Surface` backed by an `HtmlCanvasElement`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to a canvas element's 2D context.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::NoContext` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(canvas_err)?
            .ok_or(SurfaceError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    /// An offscreen canvas created in `document`, for the virtual surface.
    ///
    /// # Errors
    ///
    /// Fails if the element cannot be created or has no 2D context.
    pub fn offscreen(document: &web_sys::Document) -> Result<Self, SurfaceError> {
        let canvas = document
            .create_element("canvas")
            .map_err(canvas_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::Canvas("created element is not a canvas".into()))?;
        Self::new(canvas)
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply_stroke(&self, style: &StrokeStyle) -> Result<(), SurfaceError> {
        self.ctx.set_stroke_style_str(&style.color.css());
        self.ctx.set_line_width(style.width);
        let dash = match style.dash {
            Some(d) => js_sys::Array::of2(&JsValue::from_f64(d), &JsValue::from_f64(d)),
            None => js_sys::Array::new(),
        };
        self.ctx.set_line_dash(&dash).map_err(canvas_err)
    }

    /// Run `f` between `save` and `restore`, restoring even when it fails.
    fn isolated(&self, f: impl FnOnce(&CanvasRenderingContext2d) -> Result<(), SurfaceError>) -> Result<(), SurfaceError> {
        self.ctx.save();
        let result = f(&self.ctx);
        self.ctx.restore();
        result
    }
}

impl Surface for CanvasSurface {
    type Bitmap = HtmlImageElement;

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ctx.clear_rect(0.0, 0.0, f64::from(self.width()), f64::from(self.height()));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.isolated(|ctx| {
            ctx.set_fill_style_str(&color.css());
            ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            Ok(())
        })
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError> {
        self.isolated(|ctx| {
            self.apply_stroke(style)?;
            ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
            Ok(())
        })
    }

    fn line(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), SurfaceError> {
        self.isolated(|ctx| {
            self.apply_stroke(style)?;
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
            Ok(())
        })
    }

    fn draw_image(&mut self, bitmap: &HtmlImageElement, paint: &ImagePaint) -> Result<(), SurfaceError> {
        let rect = paint.rect;
        let center = rect.center();
        self.isolated(|ctx| {
            ctx.translate(center.x, center.y).map_err(canvas_err)?;
            ctx.scale(
                if paint.flip_horizontal { -1.0 } else { 1.0 },
                if paint.flip_vertical { -1.0 } else { 1.0 },
            )
            .map_err(canvas_err)?;
            ctx.set_global_alpha(paint.opacity);
            ctx.set_filter(filter::css_filter(paint.effect));
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                bitmap,
                -rect.width / 2.0,
                -rect.height / 2.0,
                rect.width,
                rect.height,
            )
            .map_err(canvas_err)
        })
    }

    fn draw_badge(
        &mut self,
        center: Point,
        radius: f64,
        fill: Color,
        outline: &StrokeStyle,
        glyph: &str,
    ) -> Result<(), SurfaceError> {
        self.isolated(|ctx| {
            ctx.begin_path();
            ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI).map_err(canvas_err)?;
            ctx.set_fill_style_str(&fill.css());
            ctx.fill();
            self.apply_stroke(outline)?;
            ctx.stroke();

            ctx.set_font(&format!("{:.0}px sans-serif", radius * 1.5));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text(glyph, center.x, center.y).map_err(canvas_err)
        })
    }

    fn blit_from(&mut self, source: &Self, src: Rect) -> Result<(), SurfaceError> {
        self.clear()?;
        self.ctx
            .draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &source.canvas,
                src.x,
                src.y,
                src.width,
                src.height,
                0.0,
                0.0,
                src.width,
                src.height,
            )
            .map_err(canvas_err)
    }

    fn pixel(&self, x: i64, y: i64) -> Result<Option<Color>, SurfaceError> {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return Ok(None);
        }
        let data = self.ctx.get_image_data(x as f64, y as f64, 1.0, 1.0).map_err(canvas_err)?.data();
        Ok(match data.0.as_slice() {
            [r, g, b, a, ..] => Some(Color::rgba(*r, *g, *b, *a)),
            _ => None,
        })
    }
}

// =============================================================
// Frame host
// =============================================================

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type TimerSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `FrameHost` over the browser window.
///
/// At most one frame callback and one timer callback are kept alive at a
/// time, which is all the redraw scheduler and the eyedropper ever queue.
pub struct BrowserFrameHost {
    window: Window,
    on_frame: Rc<dyn Fn(FrameHandle)>,
    on_timer: Rc<dyn Fn(TimerHandle)>,
    frame_cb: FrameSlot,
    timer_cb: TimerSlot,
}

impl BrowserFrameHost {
    /// # Errors
    ///
    /// Returns `HostError::NoWindow` outside a browser window.
    pub fn new(
        on_frame: impl Fn(FrameHandle) + 'static,
        on_timer: impl Fn(TimerHandle) + 'static,
    ) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        Ok(Self {
            window,
            on_frame: Rc::new(on_frame),
            on_timer: Rc::new(on_timer),
            frame_cb: Rc::new(RefCell::new(None)),
            timer_cb: Rc::new(RefCell::new(None)),
        })
    }
}

impl FrameHost for BrowserFrameHost {
    fn request_frame(&mut self) -> Result<FrameHandle, HostError> {
        let id = Rc::new(Cell::new(0));
        let id_for_cb = Rc::clone(&id);
        let holder_for_cb = Rc::clone(&self.frame_cb);
        let on_frame = Rc::clone(&self.on_frame);
        let cb = Closure::wrap(Box::new(move |_ts: f64| {
            // Kept alive until the engine has run; it may queue a replacement.
            let current = holder_for_cb.borrow_mut().take();
            on_frame(FrameHandle(id_for_cb.get()));
            drop(current);
        }) as Box<dyn FnMut(f64)>);

        let handle = self.window.request_animation_frame(cb.as_ref().unchecked_ref()).map_err(host_err)?;
        id.set(handle);
        *self.frame_cb.borrow_mut() = Some(cb);
        Ok(FrameHandle(handle))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            tracing::warn!(error = ?e, "cancelAnimationFrame failed");
        }
        self.frame_cb.borrow_mut().take();
    }

    fn set_timer(&mut self, delay_ms: u32) -> Result<TimerHandle, HostError> {
        let id = Rc::new(Cell::new(0));
        let id_for_cb = Rc::clone(&id);
        let holder_for_cb = Rc::clone(&self.timer_cb);
        let on_timer = Rc::clone(&self.on_timer);
        let cb = Closure::wrap(Box::new(move || {
            let current = holder_for_cb.borrow_mut().take();
            on_timer(TimerHandle(id_for_cb.get()));
            drop(current);
        }) as Box<dyn FnMut()>);

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay)
            .map_err(host_err)?;
        id.set(handle);
        *self.timer_cb.borrow_mut() = Some(cb);
        Ok(TimerHandle(handle))
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0);
        self.timer_cb.borrow_mut().take();
    }
}

// =============================================================
// Image loader
// =============================================================

type LoadCallback = Box<dyn FnOnce(Result<DecodedBitmap<HtmlImageElement>, DecodeError>)>;

struct PendingLoad {
    image: HtmlImageElement,
    source: SourceRef,
    object_url: Option<String>,
    done: Option<LoadCallback>,
    handlers: Option<(Closure<dyn FnMut()>, Closure<dyn FnMut()>)>,
}

/// Load `source` into an `HtmlImageElement` and call `done` once it settles.
///
/// Byte sources go through a temporary object URL that is revoked when the
/// load finishes either way. Errors setting the load up are returned directly
/// and `done` is never called.
///
/// # Errors
///
/// Fails if the image element, blob, or object URL cannot be created.
pub fn load_image(
    source: &SourceRef,
    done: impl FnOnce(Result<DecodedBitmap<HtmlImageElement>, DecodeError>) + 'static,
) -> Result<(), DecodeError> {
    let image = HtmlImageElement::new().map_err(browser_err)?;
    let (url, object_url) = match source {
        SourceRef::Url(url) => (url.clone(), None),
        SourceRef::Bytes(bytes) => {
            let array = js_sys::Uint8Array::from(&bytes[..]);
            let blob = Blob::new_with_u8_array_sequence(&js_sys::Array::of1(&array)).map_err(browser_err)?;
            let url = Url::create_object_url_with_blob(&blob).map_err(browser_err)?;
            (url.clone(), Some(url))
        }
    };

    let load = Rc::new(RefCell::new(PendingLoad {
        image: image.clone(),
        source: source.clone(),
        object_url,
        done: Some(Box::new(done)),
        handlers: None,
    }));

    let load_ok = Rc::clone(&load);
    let on_load = Closure::wrap(Box::new(move || finish_load(&load_ok, true)) as Box<dyn FnMut()>);
    let load_err = Rc::clone(&load);
    let on_error = Closure::wrap(Box::new(move || finish_load(&load_err, false)) as Box<dyn FnMut()>);

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    load.borrow_mut().handlers = Some((on_load, on_error));
    image.set_src(&url);
    Ok(())
}

fn finish_load(load: &Rc<RefCell<PendingLoad>>, loaded: bool) {
    let mut pending = load.borrow_mut();
    pending.image.set_onload(None);
    pending.image.set_onerror(None);
    let handlers = pending.handlers.take();
    if let Some(url) = pending.object_url.take() {
        if let Err(e) = Url::revoke_object_url(&url) {
            tracing::warn!(error = ?e, "revokeObjectURL failed");
        }
    }

    let (width, height) = (pending.image.natural_width(), pending.image.natural_height());
    let result = if !loaded {
        Err(DecodeError::Browser("image element failed to load".into()))
    } else if width == 0 || height == 0 {
        Err(DecodeError::Empty)
    } else {
        Ok(DecodedBitmap { width, height, bitmap: pending.image.clone(), source: pending.source.clone() })
    };
    let done = pending.done.take();
    drop(pending);

    if let Some(done) = done {
        done(result);
    }
    drop(handlers);
}
