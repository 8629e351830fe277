//! Column definitions and per-field validation.
//!
//! Every column carries a `ColumnKind`, the rule applied to each field in
//! that column. Validation produces a human-readable message, stored on
//! the field as its error annotation.
//!
//! ## Case Sensitivity
//!
//! Choice matching is case-sensitive. "Yes" != "yes". Users who want
//! case-insensitive matching should normalize their options.

use serde::{Deserialize, Serialize};

/// The validation rule for one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ColumnKind {
    /// Free text. If `required`, the empty string is rejected.
    Text {
        #[serde(default)]
        required: bool,
    },
    /// A decimal number, optionally bounded on either side.
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// One of a fixed set of options (exact match).
    Choice { options: Vec<String> },
}

impl ColumnKind {
    /// Validate a raw value against this kind.
    ///
    /// Returns the error message a host should surface, or `Ok(())` if the
    /// value is acceptable.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            ColumnKind::Text { required } => {
                if *required && value.is_empty() {
                    return Err("a value is required".to_string());
                }
                Ok(())
            }
            ColumnKind::Number { min, max } => {
                let n: f64 = value
                    .parse()
                    .map_err(|_| format!("\"{}\" is not a number", value))?;
                if let Some(min) = min {
                    if n < *min {
                        return Err(format!("must be at least {}", min));
                    }
                }
                if let Some(max) = max {
                    if n > *max {
                        return Err(format!("must be at most {}", max));
                    }
                }
                Ok(())
            }
            ColumnKind::Choice { options } => {
                if options.iter().any(|o| o == value) {
                    Ok(())
                } else {
                    Err(format!("must be one of: {}", options.join(", ")))
                }
            }
        }
    }
}

/// One column of a table: a title plus its validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub title: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(title: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }

    /// Create a free-text column.
    pub fn text(title: impl Into<String>, required: bool) -> Self {
        Self::new(title, ColumnKind::Text { required })
    }

    /// Create a numeric column with optional bounds.
    pub fn number(title: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(title, ColumnKind::Number { min, max })
    }

    /// Create a fixed-choice column.
    pub fn choice(title: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(title, ColumnKind::Choice { options })
    }
}
