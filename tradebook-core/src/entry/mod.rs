//! Document-entry editors and the form session that owns them.

mod line_items;
mod payments;
mod session;

pub use line_items::LineItemEditor;
pub use payments::PaymentEditor;
pub use session::EntrySession;

/// Whether an editor is appending new rows or replacing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(usize),
}

impl EditState {
    pub fn editing_index(&self) -> Option<usize> {
        match self {
            EditState::Idle => None,
            EditState::Editing(index) => Some(*index),
        }
    }

    /// Keep the state pointing at the same logical row after a removal.
    /// Removing the edited row itself drops back to idle.
    pub(crate) fn after_remove(&mut self, removed: usize) {
        if let EditState::Editing(index) = *self {
            if index == removed {
                *self = EditState::Idle;
            } else if index > removed {
                *self = EditState::Editing(index - 1);
            }
        }
    }
}
