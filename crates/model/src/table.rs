//! The user-accessible table: named, typed columns, validated rows.
//!
//! The table is the single source of truth for an edit session. It is not
//! thread-safe by design: all reads and mutations happen on one logical
//! thread, with the edit frame as the sole mutator. Hosts observe changes
//! through [`Table::subscribe`]; every successful mutation emits exactly
//! one event, after the mutation has been applied.

use crate::column::ColumnSpec;
use crate::events::{EventCallback, SubscriberId, TableEvent};
use crate::field::Field;

/// Upper bound on rows a table will hold. User-accessible tables are small
/// configuration structures; the cap keeps a runaway host from ballooning
/// the model and gives `insert_rows` a genuine rejection path.
pub const MAX_ROWS: usize = 10_000;

/// A named, editable table of validated fields.
pub struct Table {
    name: String,
    columns: Vec<ColumnSpec>,
    rows: Vec<Vec<Field>>,
    changed: bool,
    next_subscriber: u64,
    subscribers: Vec<(SubscriberId, EventCallback)>,
}

impl Table {
    /// Create an empty table with the given schema.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
            changed: false,
            next_subscriber: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The raw value at (row, col), or `None` if out of range.
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|f| f.value())
    }

    /// The error annotation at (row, col), if the field exists and its
    /// current value fails validation.
    pub fn error(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.error()
    }

    /// True if any field in the table carries an error annotation.
    pub fn has_errors(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.iter().any(|f| f.has_error()))
    }

    /// True since the last successful save/load, if anything was mutated.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Reset the pending-changes flag. Called by stores after a successful
    /// save or load.
    pub fn mark_saved(&mut self) {
        self.changed = false;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Set the value of one field, revalidating it. Returns false if the
    /// position is out of range.
    pub fn set_value(&mut self, row: usize, col: usize, value: &str) -> bool {
        let kind = match self.columns.get(col) {
            Some(spec) => spec.kind.clone(),
            None => return false,
        };
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(field) => field.set(value, &kind),
            None => return false,
        }
        self.changed = true;
        self.emit(TableEvent::DataChanged { row, col });
        true
    }

    /// Insert `count` empty rows at `at`. Every field starts empty and is
    /// validated, so required/numeric columns flag errors immediately.
    ///
    /// Returns false (without mutating) if `at` is past the end, `count` is
    /// zero, or the insert would exceed [`MAX_ROWS`].
    pub fn insert_rows(&mut self, at: usize, count: usize) -> bool {
        if count == 0 || at > self.rows.len() || self.rows.len() + count > MAX_ROWS {
            return false;
        }
        for i in 0..count {
            let row: Vec<Field> = self
                .columns
                .iter()
                .map(|spec| Field::new("", &spec.kind))
                .collect();
            self.rows.insert(at + i, row);
        }
        self.changed = true;
        self.emit(TableEvent::RowsInserted { at, count });
        true
    }

    /// Remove `count` rows starting at `at`. Returns false (without
    /// mutating) if the range is not fully inside the table.
    pub fn remove_rows(&mut self, at: usize, count: usize) -> bool {
        let end = match at.checked_add(count) {
            Some(end) if count > 0 && end <= self.rows.len() => end,
            _ => return false,
        };
        self.rows.drain(at..end);
        self.changed = true;
        self.emit(TableEvent::RowsRemoved { at, count });
        true
    }

    /// Copy all field values from row `src` into row `dst`, revalidating
    /// each field. The copy takes the values as they are now; later edits
    /// to `src` do not affect `dst`.
    pub fn copy_row(&mut self, dst: usize, src: usize) -> bool {
        if dst >= self.rows.len() || src >= self.rows.len() || dst == src {
            return false;
        }
        let values: Vec<String> = self.rows[src].iter().map(|f| f.value().to_string()).collect();
        for (col, value) in values.into_iter().enumerate() {
            let kind = &self.columns[col].kind;
            self.rows[dst][col].set(value, kind);
        }
        self.changed = true;
        self.emit(TableEvent::DataChanged { row: dst, col: 0 });
        true
    }

    /// Drop all rows. Emits one RowsRemoved covering the old contents.
    pub fn clear_rows(&mut self) {
        let count = self.rows.len();
        if count == 0 {
            return;
        }
        self.rows.clear();
        self.changed = true;
        self.emit(TableEvent::RowsRemoved { at: 0, count });
    }

    // =========================================================================
    // Record import/export (used by persistence backends)
    // =========================================================================

    /// All field values, row-major.
    pub fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|f| f.value().to_string()).collect())
            .collect()
    }

    /// Replace all rows with the given records, validating every field.
    /// Records shorter than the schema are padded with empty fields;
    /// longer ones are truncated (with a warning).
    pub fn set_records(&mut self, records: Vec<Vec<String>>) {
        let removed = self.rows.len();
        let cols = self.columns.len();
        self.rows = records
            .into_iter()
            .map(|mut record| {
                if record.len() > cols {
                    log::warn!(
                        "table '{}': record has {} fields, expected {}; extra fields dropped",
                        self.name,
                        record.len(),
                        cols
                    );
                }
                record.resize(cols, String::new());
                record
                    .into_iter()
                    .zip(self.columns.iter())
                    .map(|(value, spec)| Field::new(value, &spec.kind))
                    .collect()
            })
            .collect();
        self.changed = true;
        if removed > 0 {
            self.emit(TableEvent::RowsRemoved {
                at: 0,
                count: removed,
            });
        }
        let inserted = self.rows.len();
        if inserted > 0 {
            self.emit(TableEvent::RowsInserted {
                at: 0,
                count: inserted,
            });
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register a callback for table events. The callback runs synchronously
    /// after each successful mutation, on the mutating thread.
    pub fn subscribe(&mut self, callback: EventCallback) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, callback));
        id
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Remove a previously registered callback. Returns false if the id is
    /// unknown (e.g. already unsubscribed).
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn emit(&mut self, event: TableEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event);
        }
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("changed", &self.changed)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
