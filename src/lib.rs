//! Scene and interaction engine for a browser moodboard.
//!
//! Users drop or paste images onto a large pannable board, then select, move,
//! resize, flip, pin, reorder, fade, and filter them, and pick colors from the
//! composed result. This crate owns the in-memory scene, the hit-testing and
//! resize geometry, the render pipeline that composes a virtual surface and
//! blits the visible window of it, and frame-coalesced redraw scheduling.
//!
//! Everything that touches the browser sits behind two traits,
//! [`surface::Surface`] and [`scheduler::FrameHost`], so the engine runs
//! natively against [`raster::RasterSurface`] in tests and headless hosts and
//! against [`web::CanvasSurface`] in WebAssembly. The page glue wires DOM
//! events into [`engine::Engine`] and carries out the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Placed images, paint order, selection, change notifications |
//! | [`viewport`] | Points, rects, and the pan offset over the virtual surface |
//! | [`hit`] | Hit-testing and resize-handle classification |
//! | [`transform`] | Resize math and per-image mutators |
//! | [`cache`] | Decoded bitmap cache with in-flight and failed tracking |
//! | [`render`] | Compose and present passes |
//! | [`scheduler`] | Redraw coalescing over a host frame callback |
//! | [`picker`] | Eyedropper sampling and preview state |
//! | [`input`] | Input event types, cursor hints, pointer session |
//! | [`surface`] | Drawing trait and paint descriptions |
//! | [`raster`] | CPU surface over `image::RgbaImage` |
//! | [`web`] | Canvas surface, frame host, and image loader for the browser |
//! | [`decode`] | Native bitmap loader |
//! | [`filter`] | Per-image effects as CSS filters and CPU pixel ops |
//! | [`config`] | JSON-loadable engine settings |
//! | [`consts`] | Shared thresholds, sizes, and colors |
//! | [`error`] | Error types |

pub mod cache;
pub mod config;
pub mod consts;
pub mod decode;
pub mod engine;
pub mod error;
pub mod filter;
pub mod hit;
pub mod input;
pub mod picker;
pub mod raster;
pub mod render;
pub mod scene;
pub mod scheduler;
pub mod surface;
pub mod transform;
pub mod viewport;
pub mod web;
