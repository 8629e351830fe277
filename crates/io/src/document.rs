//! On-disk representation of a table: schema plus records in one document.

use serde::{Deserialize, Serialize};

use usertab_model::{ColumnSpec, Table};

/// Serialized form of a table. One document per table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDocument {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub records: Vec<Vec<String>>,
}

impl TableDocument {
    /// Snapshot a live table into its document form.
    pub fn from_table(table: &Table) -> Self {
        Self {
            name: table.name().to_string(),
            columns: table.columns().to_vec(),
            records: table.records(),
        }
    }

    /// Build a live table from a document. Every field is validated on the
    /// way in; the result has no pending changes.
    pub fn into_table(self) -> Table {
        let mut table = Table::new(self.name, self.columns);
        table.set_records(self.records);
        table.mark_saved();
        table
    }
}
