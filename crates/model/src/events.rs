//! Change events emitted by the table model.
//!
//! Hosts subscribe with a callback instead of polling. The edit frame uses
//! the same mechanism to reconcile its selection and error hint after each
//! mutation; the `EventCollector` is used by tests to assert on event
//! ordering.

/// Events emitted by `Table` after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// One or more fields changed value. Carries the top-left field of the
    /// changed span (a single-cell edit carries that cell).
    DataChanged { row: usize, col: usize },

    /// `count` rows were inserted starting at `at`.
    RowsInserted { at: usize, count: usize },

    /// `count` rows were removed starting at `at`.
    RowsRemoved { at: usize, count: usize },
}

/// Callback type for receiving table events.
pub type EventCallback = Box<dyn FnMut(&TableEvent)>;

/// Handle for a registered callback, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub(crate) u64);

/// Simple event collector for testing.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<TableEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: TableEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TableEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter to only DataChanged events, as (row, col) pairs.
    pub fn data_changed(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TableEvent::DataChanged { row, col } => Some((*row, *col)),
                _ => None,
            })
            .collect()
    }

    /// Filter to only RowsInserted events, as (at, count) pairs.
    pub fn rows_inserted(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TableEvent::RowsInserted { at, count } => Some((*at, *count)),
                _ => None,
            })
            .collect()
    }

    /// Filter to only RowsRemoved events, as (at, count) pairs.
    pub fn rows_removed(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TableEvent::RowsRemoved { at, count } => Some((*at, *count)),
                _ => None,
            })
            .collect()
    }
}
