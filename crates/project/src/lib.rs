//! `tl-project` -- Project record save/load for the timeline editing engine.
//!
//! - **Save/Load**: `ProjectFile` to and from JSON, written atomically.
//! - **Migration**: older records are upgraded before deserialization; newer ones are refused.
//! - **Orphans**: clips referencing a missing track are removed on conversion to a
//!   `Document` and either reported or dropped per `OrphanPolicy`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tl_app_state::TimelineStore;
//! use tl_common::EditorConfig;
//! use tl_project::{load_document, save_document};
//!
//! let config = EditorConfig::default();
//! let (doc, report) = load_document(Path::new("cut.tlp"), config.orphan_policy).unwrap();
//! let mut store = TimelineStore::new(config);
//! store.load_document(doc);
//! assert!(report.is_clean());
//!
//! save_document(store.doc(), Path::new("cut.tlp")).unwrap();
//! ```

pub mod error;
pub mod load;
pub mod migrate;
pub mod save;
pub mod types;

pub use error::{ProjectError, ProjectResult};
pub use load::{from_json_string, load_document, load_project};
pub use migrate::{migrate_project, CURRENT_VERSION};
pub use save::{save_document, save_project, to_json_string, to_json_string_compact};
pub use types::{LoadReport, ProjectFile};
