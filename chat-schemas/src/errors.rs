//! Validation error types shared by both schemas.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// What went wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    /// A required field is absent (or explicitly `null`).
    MissingField,
    /// `content` is present but blank after trimming.
    EmptyValue,
    /// The value has the right type but the wrong shape (e.g. not an email).
    InvalidFormat,
    /// The value has a structurally incompatible type (e.g. number instead of text).
    WrongType,
}

impl ViolationKind {
    /// Stable machine-readable code, same spelling as the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::MissingField => "MISSING_FIELD",
            ViolationKind::EmptyValue => "EMPTY_VALUE",
            ViolationKind::InvalidFormat => "INVALID_FORMAT",
            ViolationKind::WrongType => "WRONG_TYPE",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Field name as it appears in the payload (`payload` for the root object).
    pub field: &'static str,
    pub kind: ViolationKind,
    /// Human-friendly explanation.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// All violations found in one payload, in field declaration order.
///
/// Never empty: a payload either validates fully or yields at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid payload: {}", join(.violations))]
pub struct ValidationErrors {
    violations: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Returns `None` when there is nothing to report.
    pub(crate) fn from_vec(violations: Vec<ValidationError>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// First violation in declaration order (fail-fast view).
    pub fn first(&self) -> &ValidationError {
        &self.violations[0]
    }

    pub fn into_first(mut self) -> ValidationError {
        self.violations.swap_remove(0)
    }

    pub fn violations(&self) -> &[ValidationError] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Looks up the violation reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.violations.iter().find(|v| v.field == field)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self {
            violations: vec![err],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

fn join(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
