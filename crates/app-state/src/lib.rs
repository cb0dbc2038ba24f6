//! `tl-app-state` -- Timeline document model and editor state.
//!
//! This crate provides:
//!
//! - **`Document`**: Tracks, clips and markers; the canonical timeline data.
//! - **`Edit`**: Structural mutations, applied atomically to a document copy.
//! - **`TimelineStore`**: Owner of all editor state and the single mutation funnel.
//! - **`HistoryManager`**: Bounded snapshot undo/redo with gesture batching.
//! - **`SelectionState`**, **`Viewport`**, **`PlaybackState`**, **`Clipboard`**.
//!
//! # Architecture
//!
//! ```text
//! TimelineStore
//! ├── document: Arc<Document>         (published, immutable once shared)
//! ├── selection: SelectionState       (subset of document clip ids)
//! ├── viewport: Viewport              (zoom + scroll)
//! ├── playback: PlaybackState         (playhead, in/out points)
//! ├── clipboard: Clipboard            (copied clips, detached ids)
//! └── history: HistoryManager
//!     ├── undo_stack: Vec<HistoryEntry>  (past snapshots)
//!     ├── redo_stack: Vec<HistoryEntry>  (undone snapshots)
//!     └── batch support                  (one entry per drag gesture)
//! ```

pub mod clipboard;
pub mod document;
pub mod edit;
pub mod history;
pub mod playback;
pub mod selection;
pub mod snapshot;
pub mod store;
pub mod viewport;

// Re-export primary types at crate root for convenience.
pub use clipboard::Clipboard;
pub use document::{first_duplicate_id, Clip, ClipEffect, ClipPatch, Document, Marker, SourceRef, Track, TrackPatch};
pub use edit::Edit;
pub use history::{HistoryEntry, HistoryManager};
pub use playback::PlaybackState;
pub use selection::SelectionState;
pub use snapshot::HistorySnapshot;
pub use store::TimelineStore;
pub use viewport::Viewport;
