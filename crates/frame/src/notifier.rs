//! Application notifications, injected into the frame at construction.
//!
//! The frame never talks to a global bus; whoever builds it decides where
//! notices go (a real application hub, a logger, or a test recorder).

/// Application-level notices emitted by the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A table with pending changes was saved successfully. Fired exactly
    /// once per such save; hosts typically refresh anything derived from
    /// the table (toolbars, filter lists, ...).
    TableSaved { name: String },
}

/// Sink for frame notices.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Discards all notices. For hosts that have nothing to refresh.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _notice: Notice) {}
}
