//! Copy/paste buffer for clips.

use tl_common::generate_id;

use crate::document::{Clip, Document};

/// Holds deep copies of copied clips, detached from the live document.
#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    clips: Vec<Clip>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with copies of the given clips (fresh ids, z-order kept).
    /// Ids not present in `doc` are skipped. Returns how many clips were copied.
    pub fn copy(&mut self, doc: &Document, ids: &[String]) -> usize {
        self.clips = doc
            .clips
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| Clip {
                id: generate_id("clip"),
                ..c.clone()
            })
            .collect();
        tracing::debug!(count = self.clips.len(), "Clips copied");
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Fresh instances of the buffered clips, shifted so the earliest one starts
    /// at `time` with the relative spacing between clips preserved.
    ///
    /// Every call yields new ids, so the same buffer can be pasted repeatedly.
    pub fn paste_at(&self, time: f64) -> Vec<Clip> {
        let Some(earliest) = self
            .clips
            .iter()
            .map(|c| c.start_time)
            .min_by(f64::total_cmp)
        else {
            return Vec::new();
        };
        let offset = time.max(0.0) - earliest;
        self.clips
            .iter()
            .map(|c| Clip {
                id: generate_id("clip"),
                start_time: (c.start_time + offset).max(0.0),
                ..c.clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SourceRef;
    use tl_common::TrackKind;

    fn make_clip(id: &str, start: f64, duration: f64) -> Clip {
        let source = SourceRef {
            media_id: "m1".into(),
            kind: TrackKind::Video,
            duration: None,
        };
        Clip {
            id: id.to_string(),
            ..Clip::new("t1", source, start, duration)
        }
    }

    fn doc() -> Document {
        let mut doc = Document::new();
        doc.clips.push(make_clip("c1", 2.0, 1.0));
        doc.clips.push(make_clip("c2", 5.0, 2.0));
        doc.clips.push(make_clip("c3", 9.0, 1.0));
        doc
    }

    #[test]
    fn copy_assigns_fresh_ids() {
        let mut cb = Clipboard::new();
        let n = cb.copy(&doc(), &["c1".into(), "c2".into(), "missing".into()]);
        assert_eq!(n, 2);
        assert!(cb.clips().iter().all(|c| c.id != "c1" && c.id != "c2"));
        assert_eq!(cb.clips()[0].start_time, 2.0);
    }

    #[test]
    fn paste_moves_earliest_to_time_and_keeps_spacing() {
        let mut cb = Clipboard::new();
        cb.copy(&doc(), &["c2".into(), "c1".into()]);
        let pasted = cb.paste_at(10.0);
        assert_eq!(pasted.len(), 2);
        assert!((pasted[0].start_time - 10.0).abs() < 1e-12);
        assert!((pasted[1].start_time - 13.0).abs() < 1e-12);
        assert_eq!(pasted[1].duration, 2.0);
    }

    #[test]
    fn repeated_paste_yields_distinct_ids() {
        let mut cb = Clipboard::new();
        cb.copy(&doc(), &["c1".into()]);
        let a = cb.paste_at(0.0);
        let b = cb.paste_at(0.0);
        assert_ne!(a[0].id, b[0].id);
        assert_ne!(a[0].id, cb.clips()[0].id);
    }

    #[test]
    fn empty_clipboard_pastes_nothing() {
        let cb = Clipboard::new();
        assert!(cb.is_empty());
        assert!(cb.paste_at(4.0).is_empty());
    }
}
