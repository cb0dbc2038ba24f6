//! Keyboard-level editor commands, independent of any key binding.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    DeleteSelection,
    SelectAll,
    ClearSelection,
    SetInPoint,
    SetOutPoint,
    ToggleRipple,
    ToggleSnap,
    ZoomIn,
    ZoomOut,
    /// Move the playhead by whole frames (negative steps backwards).
    StepFrames(i32),
    Undo,
    Redo,
    Copy,
    Paste,
    Cut,
    CancelDrag,
}

impl Command {
    /// Whether the command changes the document. These are refused mid-gesture.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::DeleteSelection | Self::Undo | Self::Redo | Self::Paste | Self::Cut
        )
    }
}
