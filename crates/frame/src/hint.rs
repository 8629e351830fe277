//! Error-hint reconciliation.
//!
//! A host displays at most one field error message at a time. On every
//! selection change, edit commit, or row removal the frame re-decides which
//! message that should be, preferring the field the user is looking at now
//! and degrading gracefully from there.

use usertab_core::{same_row, CellRef, Selection};
use usertab_model::Table;

/// The single error message currently offered to the user, bound to the
/// field it came from, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Hint {
    Shown { field: CellRef, message: String },
    #[default]
    Cleared,
}

impl Hint {
    /// The message to display, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Hint::Shown { message, .. } => Some(message),
            Hint::Cleared => None,
        }
    }

    /// The field the message belongs to, if any.
    pub fn field(&self) -> Option<CellRef> {
        match self {
            Hint::Shown { field, .. } => Some(*field),
            Hint::Cleared => None,
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, Hint::Cleared)
    }
}

/// Decide which error hint to show after a selection/edit/removal event.
///
/// If the current field has an error, show it.
/// Otherwise if the row has not changed, but the previous field has an
/// error, show it.
/// Otherwise pick the first error in the current row.
/// Otherwise show the error from the previous field (if any).
/// Otherwise clear the hint.
///
/// Total: any (current, previous) pair, in range or not, yields exactly
/// one `Hint`. Stale references simply have no error annotation.
pub fn check_error_hint(table: &Table, current: Selection, previous: Selection) -> Hint {
    if let Some(cur) = current {
        if let Some(hint) = hint_from_field(table, cur) {
            return hint;
        }

        if same_row(current, previous) {
            if let Some(hint) = previous.and_then(|prev| hint_from_field(table, prev)) {
                return hint;
            }
        }

        for col in 0..table.column_count() {
            if let Some(hint) = hint_from_field(table, CellRef::new(cur.row, col)) {
                return hint;
            }
        }
    }

    if let Some(prev) = previous {
        if let Some(hint) = hint_from_field(table, prev) {
            return hint;
        }
    }

    Hint::Cleared
}

fn hint_from_field(table: &Table, field: CellRef) -> Option<Hint> {
    table.error(field.row, field.col).map(|message| Hint::Shown {
        field,
        message: message.to_string(),
    })
}
