//! Core types shared by the table model and the edit frame.
//!
//! A `CellRef` addresses one field of a table. A selection is
//! `Option<CellRef>`: `None` is the "no current cell" state that a host
//! view reports when nothing is focused.

use serde::{Deserialize, Serialize};

/// Position of one field in a table.
///
/// Row and column are 0-based. Row indices are contiguous and shift on
/// insert/remove, so a `CellRef` is only meaningful against the table
/// state it was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
}

impl CellRef {
    /// Create a new CellRef.
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 1-based for display, matching how hosts number rows for users.
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// The current cell of a table view, if any.
pub type Selection = Option<CellRef>;

/// True if both selections point at the same row.
///
/// `None` has no row, so it never shares a row with anything.
pub fn same_row(a: Selection, b: Selection) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.row == b.row,
        _ => false,
    }
}
