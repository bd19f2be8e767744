//! Structured error bodies returned by the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-field validation failures, serialized as
/// `{"error_type": "validation", "errors": {"field": ["message", ...]}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    error_type: FormErrorType,
    errors: BTreeMap<String, Vec<String>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FormErrorType {
    #[default]
    Validation,
}

impl FormErrors {
    /// An empty error collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Whether any failure has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }
}

/// Generic error body for non-validation failures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Stable machine-readable code.
    pub code: String,
    /// Human readable message.
    pub message: String,
}
