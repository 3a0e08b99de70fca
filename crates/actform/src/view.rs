// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! View bindings that read an action result back into form controls.
//!
//! A template renders one form per [`ActionResult`]. The form boundary
//! creates a [`FormScope`] over the result and hands it down; each field
//! asks the scope for a [`FieldScope`] and reads its ids, default value and
//! messages from there. Nothing is global: the scope is a plain borrowed
//! value living for one render.
//!
//! # Example
//!
//! ```rust
//! use actform::{ActionResult, FieldErrors, FormScope};
//! use serde_json::json;
//!
//! let result = ActionResult::invalid(
//!     json!({ "email": "nope" }),
//!     FieldErrors::single("email", "Invalid email"),
//! );
//!
//! let form = FormScope::new(&result);
//! let email = form.field("email");
//!
//! assert_eq!(email.id(), "email-form-item");
//! assert_eq!(email.default_value(), Some(&json!("nope")));
//! assert!(email.is_invalid());
//! ```

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::actions::ActionResult;

/// The result to render before the first submission.
pub fn initial_state(data: Option<JsonValue>) -> ActionResult {
    ActionResult::idle(data)
}

/// The form boundary: the current result plus form-level options.
#[derive(Debug, Clone, Copy)]
pub struct FormScope<'a> {
    state: &'a ActionResult,
    reset: bool,
    separator: char,
}

impl<'a> FormScope<'a> {
    /// Creates a scope over a result. Reset-on-success is enabled.
    pub fn new(state: &'a ActionResult) -> Self {
        Self {
            state,
            reset: true,
            separator: '.',
        }
    }

    /// Enables or disables clearing the form after a successful submission.
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Sets the separator used to look up nested default values.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// The result this scope reads from.
    pub fn state(&self) -> &'a ActionResult {
        self.state
    }

    /// True when the form should be cleared: reset is enabled and the
    /// submission succeeded.
    pub fn should_reset(&self) -> bool {
        self.reset && self.state.is_success()
    }

    /// Returns the binding for one field.
    pub fn field(&self, name: impl Into<String>) -> FieldScope<'a> {
        FieldScope {
            state: self.state,
            separator: self.separator,
            name: name.into(),
        }
    }

    /// Returns the notification to show for the current result, if any.
    pub fn toast(&self, messages: &ToastMessages) -> Option<Toast> {
        match self.state {
            ActionResult::Success { .. } => Some(Toast {
                kind: ToastKind::Success,
                title: messages.success.clone(),
                description: None,
            }),
            ActionResult::Error { error, .. } => Some(Toast {
                kind: ToastKind::Error,
                title: messages.error.clone(),
                description: Some(match &messages.format_error {
                    Some(format) => format(error.as_str()),
                    None => error.clone(),
                }),
            }),
            _ => None,
        }
    }
}

/// The binding for one field of a [`FormScope`].
#[derive(Debug, Clone)]
pub struct FieldScope<'a> {
    state: &'a ActionResult,
    separator: char,
    name: String,
}

impl<'a> FieldScope<'a> {
    /// The field name, as submitted.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the input element.
    pub fn id(&self) -> String {
        format!("{}-form-item", self.name)
    }

    /// Id of the description element.
    pub fn description_id(&self) -> String {
        format!("{}-form-item-description", self.name)
    }

    /// Id of the message element.
    pub fn message_id(&self) -> String {
        format!("{}-form-item-message", self.name)
    }

    /// The value to pre-fill the input with.
    ///
    /// Looks up the exact name first, then the name as a nested path
    /// (`address.city` → `data.address.city`).
    pub fn default_value(&self) -> Option<&'a JsonValue> {
        let data = self.state.data()?;
        if let Some(value) = data.get(&self.name) {
            return Some(value);
        }
        self.name
            .split(self.separator)
            .try_fold(data, |value, segment| value.get(segment))
    }

    /// The validation messages for this field.
    pub fn errors(&self) -> &'a [String] {
        self.state.field_errors(&self.name)
    }

    /// True when the field has validation messages.
    pub fn is_invalid(&self) -> bool {
        !self.errors().is_empty()
    }

    /// The message to show under the field: its errors, else the fallback.
    pub fn message<'b>(&self, fallback: Option<&'b str>) -> Option<FieldMessage<'b>>
    where
        'a: 'b,
    {
        let errors = self.errors();
        if !errors.is_empty() {
            return Some(FieldMessage::Errors(errors));
        }
        fallback.filter(|f| !f.is_empty()).map(FieldMessage::Fallback)
    }

    /// Attributes for the input element.
    pub fn input_props(&self) -> InputProps<'a> {
        InputProps {
            default_value: self.default_value(),
            id: self.id(),
            name: self.name.clone(),
        }
    }

    /// Attributes for the label element.
    pub fn label_props(&self) -> LabelProps {
        LabelProps {
            html_for: self.id(),
            invalid: self.is_invalid(),
        }
    }
}

/// What to show under a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMessage<'a> {
    /// Validation messages for the field.
    Errors(&'a [String]),
    /// The template's own text, shown when there are no errors.
    Fallback(&'a str),
}

impl<'a> FieldMessage<'a> {
    /// The message as lines of text.
    pub fn lines(&self) -> Vec<&'a str> {
        match *self {
            FieldMessage::Errors(errors) => errors.iter().map(String::as_str).collect(),
            FieldMessage::Fallback(text) => vec![text],
        }
    }

    /// True when the message comes from validation.
    pub fn is_error(&self) -> bool {
        matches!(self, FieldMessage::Errors(_))
    }
}

/// Attributes for a field's input element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputProps<'a> {
    /// Value to pre-fill.
    pub default_value: Option<&'a JsonValue>,
    /// Element id.
    pub id: String,
    /// Submitted field name.
    pub name: String,
}

/// Attributes for a field's label element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelProps {
    /// Id of the labelled input.
    pub html_for: String,
    /// True when the field has validation messages.
    pub invalid: bool,
}

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// The submission succeeded.
    Success,
    /// The handler failed.
    Error,
}

/// A notification for a finished submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    /// Kind of notification.
    pub kind: ToastKind,
    /// Headline.
    pub title: String,
    /// Detail text; the error message for failures.
    pub description: Option<String>,
}

/// Texts used by [`FormScope::toast`].
pub struct ToastMessages {
    success: String,
    error: String,
    format_error: Option<Box<dyn Fn(&str) -> String + Send + Sync>>,
}

impl ToastMessages {
    /// Sets the success headline.
    pub fn success(mut self, title: impl Into<String>) -> Self {
        self.success = title.into();
        self
    }

    /// Sets the error headline.
    pub fn error(mut self, title: impl Into<String>) -> Self {
        self.error = title.into();
        self
    }

    /// Formats the error message shown as the description.
    pub fn format_error(mut self, format: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.format_error = Some(Box::new(format));
        self
    }
}

impl Default for ToastMessages {
    fn default() -> Self {
        Self {
            success: "Action completed successfully".to_string(),
            error: "Something went wrong".to_string(),
            format_error: None,
        }
    }
}

impl std::fmt::Debug for ToastMessages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastMessages")
            .field("success", &self.success)
            .field("error", &self.error)
            .field("format_error", &self.format_error.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::FieldErrors;
    use serde_json::json;

    #[test]
    fn test_field_ids() {
        let state = initial_state(None);
        let field = FormScope::new(&state).field("email");
        assert_eq!(field.name(), "email");
        assert_eq!(field.id(), "email-form-item");
        assert_eq!(field.description_id(), "email-form-item-description");
        assert_eq!(field.message_id(), "email-form-item-message");
    }

    #[test]
    fn test_default_values_from_initial_state() {
        let state = initial_state(Some(json!({ "name": "Ada", "address": { "city": "Rome" } })));
        let form = FormScope::new(&state);

        assert_eq!(form.field("name").default_value(), Some(&json!("Ada")));
        assert_eq!(form.field("address.city").default_value(), Some(&json!("Rome")));
        assert_eq!(form.field("address.zip").default_value(), None);
        assert!(!form.should_reset());
    }

    #[test]
    fn test_flat_dotted_key_wins_over_path() {
        let state = ActionResult::success(json!({ "a.b": "flat", "a": { "b": "nested" } }));
        assert_eq!(FormScope::new(&state).field("a.b").default_value(), Some(&json!("flat")));
    }

    #[test]
    fn test_invalid_field_messages() {
        let state = ActionResult::invalid(
            json!({ "email": "nope", "name": "Ada" }),
            FieldErrors::new().with("email", "Invalid email").with("email", "Too short"),
        );
        let form = FormScope::new(&state);

        let email = form.field("email");
        assert!(email.is_invalid());
        assert!(email.label_props().invalid);
        let message = email.message(Some("We never share it")).unwrap();
        assert!(message.is_error());
        assert_eq!(message.lines(), vec!["Invalid email", "Too short"]);

        let name = form.field("name");
        assert!(!name.is_invalid());
        assert_eq!(name.message(Some("Your name")), Some(FieldMessage::Fallback("Your name")));
        assert_eq!(name.message(None), None);
        assert_eq!(name.message(Some("")), None);
    }

    #[test]
    fn test_input_props_serialize() {
        let state = ActionResult::invalid(json!({ "email": "nope" }), FieldErrors::single("email", "x"));
        let props = FormScope::new(&state).field("email").input_props();
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({ "defaultValue": "nope", "id": "email-form-item", "name": "email" })
        );
        assert_eq!(
            serde_json::to_value(FormScope::new(&state).field("email").label_props()).unwrap(),
            json!({ "htmlFor": "email-form-item", "invalid": true })
        );
    }

    #[test]
    fn test_reset_only_after_success() {
        let success = ActionResult::success(json!({}));
        assert!(FormScope::new(&success).should_reset());
        assert!(!FormScope::new(&success).with_reset(false).should_reset());

        let error = ActionResult::error(json!({}), "boom");
        assert!(!FormScope::new(&error).should_reset());
    }

    #[test]
    fn test_toasts() {
        let messages = ToastMessages::default()
            .success("Saved")
            .format_error(|e| format!("Details: {}", e));

        let success = ActionResult::success(json!({}));
        assert_eq!(
            FormScope::new(&success).toast(&messages),
            Some(Toast {
                kind: ToastKind::Success,
                title: "Saved".to_string(),
                description: None,
            })
        );

        let error = ActionResult::error(json!({}), "boom");
        let toast = FormScope::new(&error).toast(&messages).unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, "Something went wrong");
        assert_eq!(toast.description.as_deref(), Some("Details: boom"));

        let invalid = ActionResult::invalid(json!({}), FieldErrors::single("a", "b"));
        assert!(FormScope::new(&invalid).toast(&messages).is_none());
        assert!(FormScope::new(&initial_state(None)).toast(&messages).is_none());
    }

    #[test]
    fn test_custom_separator_lookup() {
        let state = initial_state(Some(json!({ "address": { "city": "Rome" } })));
        let form = FormScope::new(&state).with_separator('/');
        assert_eq!(form.field("address/city").default_value(), Some(&json!("Rome")));
    }
}
