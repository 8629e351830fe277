// JSON file store
// One pretty-printed document per table, by default under the user config dir.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use usertab_model::Table;

use crate::document::TableDocument;
use crate::Store;

/// Stores one table as a JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default location for a table, e.g.
    /// `~/.config/usertab/capture_filters.json`. `None` if the platform
    /// has no config dir.
    pub fn default_path(table_name: &str) -> Option<PathBuf> {
        let slug: String = table_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        dirs::config_dir().map(|dir| dir.join("usertab").join(format!("{}.json", slug)))
    }

    /// Read the full document (schema and records) from disk.
    pub fn open_document(&self) -> Result<TableDocument, String> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| format!("{}: {}", self.path.display(), e))?;
        serde_json::from_str(&content).map_err(|e| format!("{}: {}", self.path.display(), e))
    }

    /// Read the document and build a live table from it.
    pub fn open_table(&self) -> Result<Table, String> {
        Ok(self.open_document()?.into_table())
    }
}

impl Store for JsonStore {
    fn load(&self, table: &mut Table) -> Result<(), String> {
        // Parse the whole document before touching the table, so a broken
        // file leaves the rows as they were.
        let doc = self.open_document()?;
        table.set_records(doc.records);
        table.mark_saved();
        Ok(())
    }

    fn save(&self, table: &Table) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("{}: {}", parent.display(), e))?;
        }
        let file =
            File::create(&self.path).map_err(|e| format!("{}: {}", self.path.display(), e))?;
        let writer = BufWriter::new(file);
        let doc = TableDocument::from_table(table);
        serde_json::to_writer_pretty(writer, &doc).map_err(|e| e.to_string())?;
        Ok(())
    }
}
