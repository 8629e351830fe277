// In-memory store
// Backs tests and ephemeral tables that should not touch the filesystem.

use std::cell::RefCell;

use usertab_model::Table;

use crate::Store;

/// A store whose "backing storage" is a record list in memory.
#[derive(Debug, Default)]
pub struct MemStore {
    records: RefCell<Vec<Vec<String>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the persisted records, as if a previous session had saved.
    pub fn with_records(records: Vec<Vec<String>>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }

    /// The records currently "persisted".
    pub fn records(&self) -> Vec<Vec<String>> {
        self.records.borrow().clone()
    }
}

impl Store for MemStore {
    fn load(&self, table: &mut Table) -> Result<(), String> {
        table.set_records(self.records.borrow().clone());
        table.mark_saved();
        Ok(())
    }

    fn save(&self, table: &Table) -> Result<(), String> {
        *self.records.borrow_mut() = table.records();
        Ok(())
    }
}
