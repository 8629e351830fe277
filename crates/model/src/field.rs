//! A field is one cell of a table: a raw value plus its current error
//! annotation. The annotation is recomputed on every value change, so it
//! is always in sync with the value.

use crate::column::ColumnKind;

/// One cell of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    value: String,
    error: Option<String>,
}

impl Field {
    /// Create a field, validating the value against its column's kind.
    pub fn new(value: impl Into<String>, kind: &ColumnKind) -> Self {
        let value = value.into();
        let error = kind.check(&value).err();
        Self { value, error }
    }

    /// Replace the value and revalidate.
    pub fn set(&mut self, value: impl Into<String>, kind: &ColumnKind) {
        self.value = value.into();
        self.error = kind.check(&self.value).err();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The validation error for the current value, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
