//! Test harness for frame operations.
//!
//! Bundles a table, an in-memory store with failure injection, and a
//! recording notifier, so tests can drive a whole edit session without a
//! filesystem or a host application.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use usertab_io::{MemStore, Store};
use usertab_model::{ColumnSpec, Table};

use crate::frame::TableFrame;
use crate::notifier::{Notice, Notifier};

/// Notifier that appends every notice to a shared list.
pub struct RecordingNotifier(pub Rc<RefCell<Vec<Notice>>>);

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

/// MemStore wrapper whose load/save can be made to fail on demand.
struct FlakyStore {
    inner: MemStore,
    fail_load: Rc<Cell<bool>>,
    fail_save: Rc<Cell<bool>>,
}

impl Store for FlakyStore {
    fn load(&self, table: &mut Table) -> Result<(), String> {
        if self.fail_load.get() {
            return Err("simulated load failure".to_string());
        }
        self.inner.load(table)
    }

    fn save(&self, table: &Table) -> Result<(), String> {
        if self.fail_save.get() {
            return Err("simulated save failure".to_string());
        }
        self.inner.save(table)
    }
}

/// A complete edit session over a three-column test table:
/// Name (required text), Port (number 1..65535), Enabled (choice on/off).
pub struct FrameHarness {
    pub table: Rc<RefCell<Table>>,
    pub frame: TableFrame,
    pub notices: Rc<RefCell<Vec<Notice>>>,
    pub fail_load: Rc<Cell<bool>>,
    pub fail_save: Rc<Cell<bool>>,
}

impl FrameHarness {
    pub fn new() -> Self {
        Self::with_clean_rows(0)
    }

    /// Start with `rows` valid, already-populated rows.
    pub fn with_clean_rows(rows: usize) -> Self {
        let mut table = Table::new(
            "Decode As",
            vec![
                ColumnSpec::text("Name", true),
                ColumnSpec::number("Port", Some(1.0), Some(65535.0)),
                ColumnSpec::choice("Enabled", vec!["on".to_string(), "off".to_string()]),
            ],
        );
        if rows > 0 {
            table.insert_rows(0, rows);
            for row in 0..rows {
                table.set_value(row, 0, &format!("entry{}", row));
                table.set_value(row, 1, "53");
                table.set_value(row, 2, "on");
            }
        }

        let table = Rc::new(RefCell::new(table));
        let notices = Rc::new(RefCell::new(Vec::new()));
        let fail_load = Rc::new(Cell::new(false));
        let fail_save = Rc::new(Cell::new(false));
        let store = FlakyStore {
            inner: MemStore::new(),
            fail_load: Rc::clone(&fail_load),
            fail_save: Rc::clone(&fail_save),
        };
        let frame = TableFrame::new(
            Rc::clone(&table),
            Box::new(store),
            Box::new(RecordingNotifier(Rc::clone(&notices))),
        );
        Self {
            table,
            frame,
            notices,
            fail_load,
            fail_save,
        }
    }

    /// Fill one row with values that pass every column's validation.
    pub fn fill_row_valid(&mut self, row: usize) {
        use usertab_core::CellRef;
        self.frame.edit(CellRef::new(row, 0), "dns");
        self.frame.edit(CellRef::new(row, 1), "53");
        self.frame.edit(CellRef::new(row, 2), "on");
    }

    pub fn row_count(&self) -> usize {
        self.table.borrow().row_count()
    }

    pub fn value(&self, row: usize, col: usize) -> String {
        self.table
            .borrow()
            .value(row, col)
            .unwrap_or_default()
            .to_string()
    }
}
