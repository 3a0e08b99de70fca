// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Action result types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Field name → ordered list of human-readable messages.
///
/// Schema failures and business-rule failures raised by a handler use the
/// same shape, so the view layer cannot tell them apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty set of field errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates field errors holding one message for one field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new().with(field, message)
    }

    /// Appends a message to a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Returns the messages for a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// True when the field has at least one message.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some_and(|m| !m.is_empty())
    }

    /// Iterates fields and their messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of fields with messages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no field errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, M: Into<String>> FromIterator<(K, M)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (K, M)>>(iter: T) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.add(field, message);
        }
        errors
    }
}

/// Discriminant of an [`ActionResult`], written as `status` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// No submission yet.
    Idle,
    /// The handler completed.
    Success,
    /// Field-level validation failed.
    Invalid,
    /// The handler failed unexpectedly.
    Error,
}

/// The outcome of one form submission attempt.
///
/// Exactly one variant holds at a time. On the wire every variant carries the
/// same `{ status, success, data, invalid, error }` shape with the unused
/// fields set to `null`, so a view can read any field without checking the
/// variant first.
///
/// # Example
///
/// ```rust
/// use actform::{ActionResult, FieldErrors};
///
/// let result = ActionResult::invalid(
///     serde_json::json!({ "email": "nope" }),
///     FieldErrors::single("email", "Invalid email"),
/// );
/// assert!(!result.is_success());
/// assert_eq!(result.field_errors("email"), ["Invalid email".to_string()]);
///
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["status"], "invalid");
/// assert_eq!(json["error"], serde_json::Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ActionResultRepr", try_from = "ActionResultRepr")]
pub enum ActionResult {
    /// Pre-submission placeholder, optionally carrying initial form values.
    Idle {
        /// Initial form values.
        data: Option<JsonValue>,
    },
    /// The handler completed; `data` is the serialized validated input.
    Success {
        /// Serialized validated input.
        data: JsonValue,
    },
    /// Validation failed; `data` is the submitted input as decoded.
    Invalid {
        /// Submitted input, used to re-populate the form.
        data: JsonValue,
        /// Messages per field.
        invalid: FieldErrors,
    },
    /// The handler failed; `data` is the serialized validated input.
    Error {
        /// Submitted input, used to re-populate the form.
        data: JsonValue,
        /// The fault's message.
        error: String,
    },
}

impl ActionResult {
    /// Creates an idle result.
    pub fn idle(data: Option<JsonValue>) -> Self {
        Self::Idle { data }
    }

    /// Creates a success result.
    pub fn success(data: JsonValue) -> Self {
        Self::Success { data }
    }

    /// Creates an invalid result.
    pub fn invalid(data: JsonValue, invalid: FieldErrors) -> Self {
        Self::Invalid { data, invalid }
    }

    /// Creates an error result.
    pub fn error(data: JsonValue, error: impl Into<String>) -> Self {
        Self::Error {
            data,
            error: error.into(),
        }
    }

    /// Returns the variant discriminant.
    pub fn status(&self) -> ResultStatus {
        match self {
            Self::Idle { .. } => ResultStatus::Idle,
            Self::Success { .. } => ResultStatus::Success,
            Self::Invalid { .. } => ResultStatus::Invalid,
            Self::Error { .. } => ResultStatus::Error,
        }
    }

    /// True for [`ActionResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// True for [`ActionResult::Invalid`].
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    /// True for [`ActionResult::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The form values carried by the result.
    pub fn data(&self) -> Option<&JsonValue> {
        match self {
            Self::Idle { data } => data.as_ref(),
            Self::Success { data } | Self::Invalid { data, .. } | Self::Error { data, .. } => Some(data),
        }
    }

    /// The field errors of an invalid result.
    pub fn invalid_fields(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid { invalid, .. } => Some(invalid),
            _ => None,
        }
    }

    /// Messages for one field; empty unless the result is invalid for it.
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.invalid_fields()
            .and_then(|errors| errors.get(field))
            .unwrap_or(&[])
    }

    /// The error message of an error result.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl Default for ActionResult {
    fn default() -> Self {
        Self::idle(None)
    }
}

/// Builds an invalid result carrying one message for one field.
///
/// Lets a handler report a business-rule failure the schema cannot see,
/// such as an e-mail address that is already registered.
///
/// ```rust
/// use actform::set_invalid;
///
/// let result = set_invalid(&serde_json::json!({ "email": "taken@example.com" }), "email", "Already registered");
/// assert!(result.is_invalid());
/// ```
pub fn set_invalid<T: Serialize + ?Sized>(
    data: &T,
    field: impl Into<String>,
    message: impl Into<String>,
) -> ActionResult {
    let data = serde_json::to_value(data).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not serialize form data for invalid result");
        JsonValue::Null
    });
    ActionResult::invalid(data, FieldErrors::single(field, message))
}

#[derive(Serialize, Deserialize)]
struct ActionResultRepr {
    status: ResultStatus,
    success: bool,
    #[serde(default)]
    data: Option<JsonValue>,
    #[serde(default)]
    invalid: Option<FieldErrors>,
    #[serde(default)]
    error: Option<String>,
}

impl From<ActionResult> for ActionResultRepr {
    fn from(result: ActionResult) -> Self {
        let status = result.status();
        let (data, invalid, error) = match result {
            ActionResult::Idle { data } => (data, None, None),
            ActionResult::Success { data } => (Some(data), None, None),
            ActionResult::Invalid { data, invalid } => (Some(data), Some(invalid), None),
            ActionResult::Error { data, error } => (Some(data), None, Some(error)),
        };
        Self {
            status,
            success: status == ResultStatus::Success,
            data,
            invalid,
            error,
        }
    }
}

impl TryFrom<ActionResultRepr> for ActionResult {
    type Error = String;

    fn try_from(repr: ActionResultRepr) -> Result<Self, String> {
        if repr.success != (repr.status == ResultStatus::Success) {
            return Err(format!("`success` contradicts status {:?}", repr.status));
        }
        let data = repr.data.unwrap_or(JsonValue::Null);
        match (repr.status, repr.invalid, repr.error) {
            (ResultStatus::Idle, None, None) => Ok(Self::idle(Some(data).filter(|d| !d.is_null()))),
            (ResultStatus::Success, None, None) => Ok(Self::success(data)),
            (ResultStatus::Invalid, Some(invalid), None) if !invalid.is_empty() => {
                Ok(Self::invalid(data, invalid))
            }
            (ResultStatus::Error, None, Some(error)) if !error.is_empty() => Ok(Self::error(data, error)),
            (status, _, _) => Err(format!("fields do not match status {:?}", status)),
        }
    }
}
