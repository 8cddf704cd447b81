//! A headless recycling engine for virtualized lists and grids.
//!
//! A [`Collection`] keeps a bounded pool of item views bound to a conceptually unbounded,
//! mutable list of items. Only the rows inside the viewport (plus a configurable cache
//! margin) are materialized; views are reused as they scroll out, and swapped per item when
//! items use different templates.
//!
//! The crate is UI-agnostic. A host layer is expected to provide:
//! - a [`ViewFactory`] that creates and disposes views for a [`TemplateId`]
//! - the viewport size
//! - pointer events in content-local space
//! - a per-frame `tick(dt)`
//!
//! Scrolling follows a small state machine ([`ScrollPhase`]): drag, inertia, elastic
//! overscroll with a rubber-band curve, instant snaps and time-bounded animated scrolls.
//!
//! Optional features: `serde` (derives for value types) and `tracing` (diagnostics under the
//! `recycler` target).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod auto_scroll;
mod collection;
mod config;
mod items;
mod layout;
mod mapper;
mod physics;
mod pool;
mod registry;
mod types;
mod view;


pub use auto_scroll::{AutoScroller, Easing, ProgressSink, ScrollTarget, Tween};
pub use collection::{Collection, OnProgressCallback, OnScrollCallback};
pub use config::{LayoutConfig, MAX_CACHE_MARGIN, MAX_SPACING, MAX_TUPLES};
pub use items::{ItemId, ItemList, OnChangeCallback};
pub use layout::{Layout, MAX_SLOTS};
pub use mapper::{Window, circular_slot};
pub use physics::{
    MIN_VELOCITY, RUBBER_BAND_FACTOR, ScrollBounds, ScrollPhase, ScrollPhysics, overscroll,
    rubber_delta, smooth_damp,
};
pub use pool::{MAX_FREE_VIEWS, RecyclingPool, SlotInfo};
pub use registry::{RegistryError, TemplateId, TemplateRegistry};
pub use types::{
    CrossAlign, Direction, MovementType, Padding, PointerButton, PointerEvent, PointerEventKind,
    Rect, Vec2, WindowMode,
};
pub use view::{CellView, Templated, ViewFactory};
