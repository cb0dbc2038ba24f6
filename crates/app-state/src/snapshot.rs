//! History snapshots of the timeline document.
//!
//! A snapshot shares the document through an `Arc`. The store never mutates a
//! document in place once it has been published, so the shared value is as
//! good as a deep copy while costing a reference-count bump to take.

use std::sync::Arc;
use std::time::SystemTime;

use crate::document::{Clip, Document, Marker, Track};

/// The `{tracks, clips, markers}` content at one point in time.
#[derive(Clone, Debug)]
pub struct HistorySnapshot {
    document: Arc<Document>,
    /// When this snapshot was taken.
    pub timestamp: SystemTime,
}

impl HistorySnapshot {
    /// Capture the given published document.
    pub fn capture(document: &Arc<Document>) -> Self {
        Self {
            document: Arc::clone(document),
            timestamp: SystemTime::now(),
        }
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn into_document(self) -> Arc<Document> {
        self.document
    }

    pub fn tracks(&self) -> &[Track] {
        &self.document.tracks
    }

    pub fn clips(&self) -> &[Clip] {
        &self.document.clips
    }

    pub fn markers(&self) -> &[Marker] {
        &self.document.markers
    }

    /// Whether both snapshots refer to the very same published document.
    pub fn same_document(&self, other: &Arc<Document>) -> bool {
        Arc::ptr_eq(&self.document, other)
    }
}
