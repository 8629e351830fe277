//! Persistence backends for user-accessible tables.
//!
//! A [`Store`] moves records between a [`Table`] and some backing storage.
//! The edit frame talks to this trait only; the JSON file store is the
//! default backend, the memory store backs tests and ephemeral tables.

pub mod document;
pub mod json;
pub mod mem;

pub use document::TableDocument;
pub use json::JsonStore;
pub use mem::MemStore;

use usertab_model::Table;

/// A persistence backend for one table.
///
/// Errors carry the backend's detail message; callers surface them to the
/// user and continue.
pub trait Store {
    /// Replace the table's rows from the backing storage.
    ///
    /// Must be all-or-nothing: on error the table's rows are left exactly
    /// as they were. A successful load leaves the table with no pending
    /// changes.
    fn load(&self, table: &mut Table) -> Result<(), String>;

    /// Write the table out to the backing storage. Does not touch the
    /// table's pending-changes flag; callers decide when a save counts
    /// as a commit.
    fn save(&self, table: &Table) -> Result<(), String>;

    /// Drop the table's in-memory rows. The backing storage is untouched,
    /// so a subsequent `load` restores the persisted state.
    fn clear(&self, table: &mut Table) {
        table.clear_rows();
    }
}
