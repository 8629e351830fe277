//! The table edit frame.
//!
//! One `TableFrame` drives one edit session over one table. Hosts forward
//! user intent (select, edit, add, copy, remove, accept, reject) and read
//! back the state they should render: the selection, whether row-scoped
//! actions apply, and the current error hint.
//!
//! The frame subscribes to its table at construction and unsubscribes when
//! dropped. Events are queued into an inbox by the subscription callback
//! and drained synchronously after every mutation, so the frame never
//! observes a half-applied change.

use std::cell::RefCell;
use std::rc::Rc;

use usertab_core::{CellRef, Selection};
use usertab_io::Store;
use usertab_model::{SubscriberId, Table, TableEvent};

use crate::hint::{check_error_hint, Hint};
use crate::notifier::{Notice, Notifier};

/// Controller for editing one user-accessible table.
pub struct TableFrame {
    table: Rc<RefCell<Table>>,
    store: Box<dyn Store>,
    notifier: Box<dyn Notifier>,
    selection: Selection,
    hint: Hint,
    row_actions_enabled: bool,
    inbox: Rc<RefCell<Vec<TableEvent>>>,
    subscription: SubscriberId,
}

impl TableFrame {
    /// Build a frame over a table, with an injected persistence backend and
    /// notice sink.
    pub fn new(
        table: Rc<RefCell<Table>>,
        store: Box<dyn Store>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let inbox: Rc<RefCell<Vec<TableEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&inbox);
        let subscription = table
            .borrow_mut()
            .subscribe(Box::new(move |event| sink.borrow_mut().push(event.clone())));
        Self {
            table,
            store,
            notifier,
            selection: None,
            hint: Hint::Cleared,
            row_actions_enabled: false,
            inbox,
            subscription,
        }
    }

    pub fn table(&self) -> Rc<RefCell<Table>> {
        Rc::clone(&self.table)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The error hint a host should currently display.
    pub fn hint(&self) -> &Hint {
        &self.hint
    }

    /// Whether row-scoped actions (delete, copy) apply right now.
    pub fn row_actions_enabled(&self) -> bool {
        self.row_actions_enabled
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Report a selection change from the view. Out-of-range cells are
    /// treated as no selection, so the stored selection always references
    /// an existing field.
    pub fn select(&mut self, cell: Selection) {
        let current = {
            let table = self.table.borrow();
            cell.filter(|c| c.row < table.row_count() && c.col < table.column_count())
        };
        let previous = self.selection;
        self.selection = current;
        self.row_actions_enabled = current.is_some();
        self.recheck_hint(current, previous);
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Commit an edited value into one field. Returns false if the field
    /// does not exist. The resulting change event re-reconciles the hint
    /// with the edited field as current.
    pub fn edit(&mut self, field: CellRef, value: &str) -> bool {
        let ok = self.table.borrow_mut().set_value(field.row, field.col, value);
        self.process_events();
        ok
    }

    /// Append a new row, optionally cloning the field values of `clone_from`.
    /// Selects the new row's first column and returns its index.
    ///
    /// Returns `None` without mutating if `clone_from` is out of range, or
    /// if the model rejects the insert (capacity) — rejection should not
    /// happen in practice, so it is reported and swallowed.
    pub fn add_row(&mut self, clone_from: Option<usize>) -> Option<usize> {
        let new_row = {
            let mut table = self.table.borrow_mut();
            if let Some(src) = clone_from {
                if src >= table.row_count() {
                    return None;
                }
            }
            let at = table.row_count();
            if !table.insert_rows(at, 1) {
                log::warn!("table '{}': failed to add a new row", table.name());
                return None;
            }
            if let Some(src) = clone_from {
                table.copy_row(at, src);
            }
            at
        };
        self.process_events();
        let first = CellRef::new(new_row, 0);
        self.select(Some(first));
        // The new row's empty fields may already carry errors; surface them
        // as if the row had just been edited.
        self.recheck_hint(Some(first), None);
        Some(new_row)
    }

    /// Append a copy of the selected row. No-op without a selection.
    pub fn copy_selected_row(&mut self) -> Option<usize> {
        let src = self.selection?.row;
        self.add_row(Some(src))
    }

    /// Remove one row. Returns false if the row does not exist or the
    /// model rejects the removal (reported, non-fatal). The selection is
    /// reconciled against the shrunk table by the removal event.
    pub fn remove_row(&mut self, row: usize) -> bool {
        let ok = {
            let mut table = self.table.borrow_mut();
            if !table.remove_rows(row, 1) {
                log::warn!("table '{}': failed to remove row {}", table.name(), row);
                false
            } else {
                true
            }
        };
        self.process_events();
        ok
    }

    /// Remove the selected row. No-op without a selection.
    pub fn remove_selected_row(&mut self) -> bool {
        match self.selection {
            Some(cell) => self.remove_row(cell.row),
            None => false,
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Save the table if it has pending changes. On success the notifier
    /// fires exactly once; on failure the error is reported and returned,
    /// and the pending changes remain.
    pub fn accept_changes(&mut self) -> Result<(), String> {
        if !self.table.borrow().changed() {
            return Ok(());
        }
        let result = self.store.save(&self.table.borrow());
        match result {
            Ok(()) => {
                let name = {
                    let mut table = self.table.borrow_mut();
                    table.mark_saved();
                    table.name().to_string()
                };
                self.notifier.notify(Notice::TableSaved { name });
                Ok(())
            }
            Err(message) => {
                log::warn!(
                    "error while saving {}: {}",
                    self.table.borrow().name(),
                    message
                );
                Err(message)
            }
        }
    }

    /// Throw away pending changes: clear the table and reload it from the
    /// store. If the reload fails the table is left empty — a defined
    /// state, reported to the caller, recoverable by a later load.
    pub fn reject_changes(&mut self) -> Result<(), String> {
        if !self.table.borrow().changed() {
            return Ok(());
        }
        self.store.clear(&mut self.table.borrow_mut());
        self.process_events();
        let result = self.store.load(&mut self.table.borrow_mut());
        self.process_events();
        match result {
            Ok(()) => Ok(()),
            Err(message) => {
                log::warn!(
                    "error while loading {}: {}",
                    self.table.borrow().name(),
                    message
                );
                Err(message)
            }
        }
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Drain and apply queued table events. Called internally after every
    /// mutation; hosts that mutate the table directly call it to let the
    /// frame catch up.
    pub fn process_events(&mut self) {
        loop {
            let events: Vec<TableEvent> = self.inbox.borrow_mut().drain(..).collect();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.apply_event(&event);
            }
        }
    }

    fn apply_event(&mut self, event: &TableEvent) {
        match event {
            TableEvent::DataChanged { row, col } => {
                // An edit committed; reconcile with the edited field as
                // current and no previous. The selection is untouched.
                self.recheck_hint(Some(CellRef::new(*row, *col)), None);
            }
            TableEvent::RowsInserted { .. } => {
                // Selection moves only when the user navigates; add_row
                // selects the new row itself.
            }
            TableEvent::RowsRemoved { .. } => self.rows_removed(),
        }
    }

    /// After rows vanish the selection may point past the end. Clamp it to
    /// the last row (or drop it if the table is empty), then reconcile the
    /// hint against the post-removal state.
    fn rows_removed(&mut self) {
        let row_count = self.table.borrow().row_count();
        let current = if row_count == 0 {
            None
        } else {
            self.selection
                .map(|cell| CellRef::new(cell.row.min(row_count - 1), cell.col))
        };
        self.selection = current;
        self.row_actions_enabled = current.is_some();
        self.recheck_hint(current, None);
    }

    fn recheck_hint(&mut self, current: Selection, previous: Selection) {
        let table = self.table.borrow();
        self.hint = check_error_hint(&table, current, previous);
    }
}

impl Drop for TableFrame {
    fn drop(&mut self) {
        // try_borrow: if the table is borrowed while we unwind, leaking the
        // subscription beats panicking in drop.
        if let Ok(mut table) = self.table.try_borrow_mut() {
            table.unsubscribe(self.subscription);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::FrameHarness;
    use usertab_model::MAX_ROWS;

    #[test]
    fn test_add_row_selects_first_column() {
        let mut h = FrameHarness::new();
        assert_eq!(h.frame.add_row(None), Some(0));
        assert_eq!(h.row_count(), 1);
        assert_eq!(h.frame.selection(), Some(CellRef::new(0, 0)));
        assert!(h.frame.row_actions_enabled());

        assert_eq!(h.frame.add_row(None), Some(1));
        assert_eq!(h.row_count(), 2);
        assert_eq!(h.frame.selection(), Some(CellRef::new(1, 0)));
    }

    #[test]
    fn test_add_row_surfaces_new_row_errors() {
        let mut h = FrameHarness::new();
        h.frame.add_row(None);
        // Fresh rows have empty required/numeric fields, so the hint lands
        // on the first flagged column of the new row.
        assert_eq!(h.frame.hint().field(), Some(CellRef::new(0, 0)));
    }

    #[test]
    fn test_add_row_clones_values_at_call_time() {
        let mut h = FrameHarness::new();
        h.frame.add_row(None);
        h.frame.edit(CellRef::new(0, 0), "http");
        h.frame.edit(CellRef::new(0, 1), "80");
        h.frame.edit(CellRef::new(0, 2), "on");

        let copy = h.frame.add_row(Some(0)).unwrap();
        assert_eq!(copy, 1);
        assert_eq!(h.value(1, 0), "http");
        assert_eq!(h.value(1, 1), "80");
        assert_eq!(h.frame.selection(), Some(CellRef::new(1, 0)));

        // Editing the source afterwards does not touch the clone.
        h.frame.edit(CellRef::new(0, 1), "8080");
        assert_eq!(h.value(1, 1), "80");
    }

    #[test]
    fn test_add_row_rejects_bad_clone_source() {
        let mut h = FrameHarness::new();
        assert_eq!(h.frame.add_row(Some(5)), None);
        assert_eq!(h.row_count(), 0);
    }

    #[test]
    fn test_add_row_capacity_rejection_is_non_fatal() {
        let mut h = FrameHarness::new();
        h.table.borrow_mut().insert_rows(0, MAX_ROWS);
        h.frame.process_events();

        assert_eq!(h.frame.add_row(None), None);
        assert_eq!(h.row_count(), MAX_ROWS);
    }

    #[test]
    fn test_copy_selected_row() {
        let mut h = FrameHarness::new();
        h.frame.add_row(None);
        h.frame.edit(CellRef::new(0, 0), "dns");
        h.frame.select(Some(CellRef::new(0, 0)));

        assert_eq!(h.frame.copy_selected_row(), Some(1));
        assert_eq!(h.value(1, 0), "dns");

        let mut empty = FrameHarness::new();
        assert_eq!(empty.frame.copy_selected_row(), None);
    }

    #[test]
    fn test_remove_last_row_invalidates_selection() {
        let mut h = FrameHarness::new();
        h.frame.add_row(None);
        assert!(h.frame.remove_row(0));
        assert_eq!(h.row_count(), 0);
        assert_eq!(h.frame.selection(), None);
        assert!(!h.frame.row_actions_enabled());
        assert!(h.frame.hint().is_cleared());
    }

    #[test]
    fn test_remove_clamps_selection_to_last_row() {
        let mut h = FrameHarness::with_clean_rows(3);
        h.frame.select(Some(CellRef::new(2, 1)));
        assert!(h.frame.remove_row(2));
        assert_eq!(h.frame.selection(), Some(CellRef::new(1, 1)));
        assert!(h.frame.row_actions_enabled());
    }

    #[test]
    fn test_remove_row_out_of_range_is_reported_not_fatal() {
        let mut h = FrameHarness::with_clean_rows(1);
        assert!(!h.frame.remove_row(7));
        assert_eq!(h.row_count(), 1);
    }

    #[test]
    fn test_select_toggles_row_actions() {
        let mut h = FrameHarness::with_clean_rows(1);
        assert!(!h.frame.row_actions_enabled());

        h.frame.select(Some(CellRef::new(0, 0)));
        assert!(h.frame.row_actions_enabled());

        h.frame.select(None);
        assert!(!h.frame.row_actions_enabled());
    }

    #[test]
    fn test_select_out_of_range_counts_as_none() {
        let mut h = FrameHarness::with_clean_rows(1);
        h.frame.select(Some(CellRef::new(4, 0)));
        assert_eq!(h.frame.selection(), None);
        assert!(!h.frame.row_actions_enabled());
    }

    #[test]
    fn test_hint_follows_edit_then_selection_in_same_row() {
        let mut h = FrameHarness::with_clean_rows(2);
        // Breaking (1,1) reconciles with the edited field as current.
        h.frame.edit(CellRef::new(1, 1), "not-a-port");
        assert_eq!(h.frame.hint().field(), Some(CellRef::new(1, 1)));

        // Moving within the same row keeps the previous field's error.
        h.frame.select(Some(CellRef::new(1, 1)));
        h.frame.select(Some(CellRef::new(1, 0)));
        assert_eq!(h.frame.hint().field(), Some(CellRef::new(1, 1)));

        // Fixing the field clears the hint on the next reconciliation.
        h.frame.edit(CellRef::new(1, 1), "443");
        assert!(h.frame.hint().is_cleared());
    }

    #[test]
    fn test_accept_fires_notifier_once() {
        let mut h = FrameHarness::new();
        h.frame.add_row(None);
        h.fill_row_valid(0);

        assert!(h.frame.accept_changes().is_ok());
        assert_eq!(
            h.notices.borrow().as_slice(),
            &[Notice::TableSaved {
                name: "Decode As".to_string()
            }]
        );
        assert!(!h.table.borrow().changed());

        // No pending changes: no save, no second notice.
        assert!(h.frame.accept_changes().is_ok());
        assert_eq!(h.notices.borrow().len(), 1);
    }

    #[test]
    fn test_accept_failure_keeps_pending_changes() {
        let mut h = FrameHarness::new();
        h.frame.add_row(None);
        h.fail_save.set(true);

        let err = h.frame.accept_changes().unwrap_err();
        assert!(err.contains("save"), "unexpected error: {}", err);
        assert!(h.table.borrow().changed());
        assert!(h.notices.borrow().is_empty());
    }

    #[test]
    fn test_reject_restores_saved_state() {
        let mut h = FrameHarness::new();
        h.frame.add_row(None);
        h.fill_row_valid(0);
        h.frame.accept_changes().unwrap();

        h.frame.add_row(None);
        h.frame.edit(CellRef::new(0, 1), "99999");
        assert_eq!(h.row_count(), 2);

        assert!(h.frame.reject_changes().is_ok());
        assert_eq!(h.row_count(), 1);
        assert_eq!(h.value(0, 1), "53");
        assert!(!h.table.borrow().changed());
        assert_eq!(h.frame.selection(), None);
        assert!(h.frame.hint().is_cleared());
    }

    #[test]
    fn test_reject_with_failing_reload_leaves_table_empty() {
        let mut h = FrameHarness::new();
        h.frame.add_row(None);
        h.fail_load.set(true);

        assert!(h.frame.reject_changes().is_err());
        assert_eq!(h.row_count(), 0);
        assert_eq!(h.frame.selection(), None);
        assert!(h.frame.hint().is_cleared());
    }

    #[test]
    fn test_reject_without_changes_is_a_noop() {
        let mut h = FrameHarness::with_clean_rows(2);
        h.table.borrow_mut().mark_saved();
        assert!(h.frame.reject_changes().is_ok());
        assert_eq!(h.row_count(), 2);
    }

    #[test]
    fn test_drop_unsubscribes_from_table() {
        let h = FrameHarness::new();
        let table = h.table.clone();
        assert_eq!(table.borrow().subscriber_count(), 1);
        drop(h);
        assert_eq!(table.borrow().subscriber_count(), 0);
    }
}
