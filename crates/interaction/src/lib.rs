//! `tl-interaction` -- Pointer and keyboard interaction over the timeline store.
//!
//! - **`HitTester`** resolves a pointer position to a ruler, header, clip, handle or empty canvas.
//! - **`SnapResolver`** pulls dragged times onto nearby clip edges and range points.
//! - **`DragController`** is the gesture state machine (move, trim, marquee, seek).
//! - **`TimelineEditor`** ties the store and the controller together and runs [`Command`]s.
//!
//! All screen geometry goes through [`tl_common::CoordinateMapper`] and [`TrackLayout`],
//! so hit-testing, dragging and rendering agree on where everything is.

pub mod commands;
pub mod drag;
pub mod editor;
pub mod layout;
pub mod snap;
pub mod view;

pub use commands::Command;
pub use drag::{ClipSnapshot, DragController, DragMode, DragState, DragSummary, Modifiers};
pub use editor::TimelineEditor;
pub use hit_test::{ClipEdge, HitTarget, HitTester};
pub use layout::{TrackLayout, TrackRow};
pub use snap::SnapResolver;
pub use view::RenderView;
