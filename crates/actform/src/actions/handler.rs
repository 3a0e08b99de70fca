// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Handler faults and handler return values.

use std::fmt;

use serde::Serialize;

use super::ActionResult;
use crate::config::ActionConfig;
use crate::error::ControlSignal;

/// A condition raised by an action handler.
///
/// Any `std::error::Error` converts into a `HandlerError` through `?`.
/// Redirect and not-found are framework control-flow signals and leave the
/// action unchanged; everything else becomes an error result.
#[derive(Debug)]
pub enum HandlerError {
    /// Ask the framework to redirect.
    Redirect {
        /// Target location.
        location: Option<String>,
    },
    /// Ask the framework to render its not-found response.
    NotFound,
    /// A plain failure message.
    Message(String),
    /// A failure carrying an error value.
    Fault(Box<dyn std::error::Error + Send + Sync + 'static>),
    /// A non-error payload; reported as its JSON text.
    Thrown(serde_json::Value),
}

impl HandlerError {
    /// Creates a redirect signal.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: Some(location.into()),
        }
    }

    /// Creates a not-found signal.
    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Creates a failure from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Creates a failure from an arbitrary serializable payload.
    pub fn thrown<T: Serialize + ?Sized>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => Self::Thrown(value),
            Err(e) => Self::Message(e.to_string()),
        }
    }

    /// The message reported in an error result.
    pub fn message(&self) -> String {
        match self {
            Self::Redirect { location } => ControlSignal::Redirect {
                location: location.clone(),
            }
            .to_string(),
            Self::NotFound => ControlSignal::NotFound.to_string(),
            Self::Message(message) => message.clone(),
            Self::Fault(error) => error.to_string(),
            Self::Thrown(value) => value.to_string(),
        }
    }

    /// Returns the control signal this condition stands for, if any.
    ///
    /// Besides the explicit variants, a fault that is a [`ControlSignal`] or
    /// whose message equals one of the configured signal messages counts.
    pub fn control_signal(&self, config: &ActionConfig) -> Option<ControlSignal> {
        let message = match self {
            Self::Redirect { location } => {
                return Some(ControlSignal::Redirect {
                    location: location.clone(),
                })
            }
            Self::NotFound => return Some(ControlSignal::NotFound),
            Self::Thrown(_) => return None,
            Self::Fault(error) => {
                if let Some(signal) = error.downcast_ref::<ControlSignal>() {
                    return Some(signal.clone());
                }
                error.to_string()
            }
            Self::Message(message) => message.clone(),
        };

        if message == config.redirect_signal {
            Some(ControlSignal::Redirect { location: None })
        } else if message == config.not_found_signal {
            Some(ControlSignal::NotFound)
        } else {
            None
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl<E> From<E> for HandlerError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::Fault(Box::new(error))
    }
}

/// A handler's normal return value.
///
/// Only an [`ActionResult::Invalid`] with at least one field message is
/// propagated as-is; any other value means the handler completed and the
/// action reports success.
pub trait IntoOutcome {
    /// Returns the result to propagate instead of success, if any.
    fn into_outcome(self) -> Option<ActionResult>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Option<ActionResult> {
        None
    }
}

impl IntoOutcome for ActionResult {
    fn into_outcome(self) -> Option<ActionResult> {
        let has_field_errors = self.invalid_fields().is_some_and(|e| !e.is_empty());
        has_field_errors.then_some(self)
    }
}

impl IntoOutcome for Option<ActionResult> {
    fn into_outcome(self) -> Option<ActionResult> {
        self.and_then(IntoOutcome::into_outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::FieldErrors;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("database unavailable")]
    struct DbError;

    fn db_call() -> Result<(), DbError> {
        Err(DbError)
    }

    fn handler_body() -> Result<(), HandlerError> {
        db_call()?;
        Ok(())
    }

    #[test]
    fn test_question_mark_converts_errors() {
        let err = handler_body().unwrap_err();
        assert!(matches!(err, HandlerError::Fault(_)));
        assert_eq!(err.message(), "database unavailable");
    }

    #[test]
    fn test_thrown_payload_uses_json_text() {
        assert_eq!(HandlerError::thrown(&json!({ "code": 42 })).message(), r#"{"code":42}"#);
        assert_eq!(HandlerError::thrown("plain").message(), r#""plain""#);
    }

    #[test]
    fn test_control_signal_detection() {
        let config = ActionConfig::default();

        assert_eq!(
            HandlerError::redirect("/done").control_signal(&config),
            Some(ControlSignal::redirect("/done"))
        );
        assert_eq!(HandlerError::not_found().control_signal(&config), Some(ControlSignal::NotFound));
        assert_eq!(
            HandlerError::msg("REDIRECT").control_signal(&config),
            Some(ControlSignal::Redirect { location: None })
        );
        assert_eq!(HandlerError::msg("NOT_FOUND").control_signal(&config), Some(ControlSignal::NotFound));
        assert_eq!(
            HandlerError::from(ControlSignal::NotFound).control_signal(&config),
            Some(ControlSignal::NotFound)
        );

        assert_eq!(HandlerError::msg("boom").control_signal(&config), None);
        assert_eq!(HandlerError::msg("redirect").control_signal(&config), None);
        assert_eq!(HandlerError::thrown("REDIRECT").control_signal(&config), None);
    }

    #[test]
    fn test_outcome_only_propagates_invalid() {
        assert!(().into_outcome().is_none());
        assert!(ActionResult::success(json!({})).into_outcome().is_none());
        assert!(ActionResult::error(json!({}), "x").into_outcome().is_none());

        let invalid = ActionResult::invalid(json!({}), FieldErrors::single("a", "b"));
        assert_eq!(invalid.clone().into_outcome(), Some(invalid.clone()));
        assert_eq!(Some(invalid.clone()).into_outcome(), Some(invalid));
        assert!(None::<ActionResult>.into_outcome().is_none());
    }

    #[test]
    fn test_outcome_ignores_invalid_without_field_errors() {
        let empty = ActionResult::invalid(json!({}), FieldErrors::new());
        assert!(empty.clone().into_outcome().is_none());
        assert!(Some(empty).into_outcome().is_none());
    }
}
