//! The edit frame: the controller a host front end drives to edit one
//! user-accessible table.
//!
//! The frame owns the current selection, reacts to model change events, and
//! decides which field's error message (if any) a host should display. It
//! is the sole mutator of its table; views only read and report selection
//! changes.

pub mod frame;
pub mod hint;
pub mod notifier;

#[cfg(test)]
pub mod harness;

pub use frame::TableFrame;
pub use hint::{check_error_hint, Hint};
pub use notifier::{Notice, Notifier, NullNotifier};
