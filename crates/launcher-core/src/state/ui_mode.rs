//! The launcher's single interaction mode.

use launcher_protocols::{EntryId, ZoneCoordinate};

/// What the user is currently doing. Only one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Idle,
    /// An entry row is expanded for editing; keystrokes are captured.
    EditingEntry(EntryId),
    /// The delete button of an entry was pressed once.
    ConfirmingDelete(EntryId),
    /// A zone title is being renamed.
    EditingZoneName(ZoneCoordinate),
    /// An entry is being dragged.
    Dragging(EntryId),
}

impl UiMode {
    /// The entry this mode points at, if any.
    pub fn entry(&self) -> Option<EntryId> {
        match self {
            UiMode::EditingEntry(id) | UiMode::ConfirmingDelete(id) | UiMode::Dragging(id) => {
                Some(*id)
            }
            UiMode::Idle | UiMode::EditingZoneName(_) => None,
        }
    }

    /// Whether a text field owns the keyboard.
    pub fn is_text_focused(&self) -> bool {
        matches!(self, UiMode::EditingEntry(_) | UiMode::EditingZoneName(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, UiMode::Idle)
    }
}
