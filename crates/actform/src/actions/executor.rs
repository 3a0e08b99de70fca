// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Form action execution.

use std::future::Future;

use super::{ActionResult, HandlerError, IntoOutcome, Schema};
use crate::config::ActionConfig;
use crate::decode::FormDataDecoder;
use crate::error::ControlSignal;
use crate::form_data::FormData;

/// A form action: schema plus handler.
///
/// Running the action decodes the submission, validates it, calls the
/// handler with the typed value and folds every outcome into an
/// [`ActionResult`]. Only framework control signals escape as `Err`.
///
/// # Example
///
/// ```rust
/// use actform::{action, schema_fn, FieldErrors, FormData, HandlerError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), actform::ControlSignal> {
/// let schema = schema_fn(|input| async move {
///     input
///         .get_text("email")
///         .map(str::to_string)
///         .ok_or_else(|| FieldErrors::single("email", "Required"))
/// });
///
/// let subscribe = action(schema, |email: String| async move {
///     if email.ends_with("@blocked.example") {
///         return Err(HandlerError::msg("This domain is blocked"));
///     }
///     Ok(())
/// });
///
/// let result = subscribe.run(FormData::from_pairs([("email", "a@b.com")])).await?;
/// assert!(result.is_success());
///
/// let result = subscribe
///     .run(FormData::from_pairs([("email", "x@blocked.example")]))
///     .await?;
/// assert_eq!(result.error_message(), Some("This domain is blocked"));
/// # Ok(())
/// # }
/// ```
pub struct FormAction<S, H> {
    schema: S,
    handler: H,
    decoder: FormDataDecoder,
    config: ActionConfig,
}

/// Creates a [`FormAction`] with the default configuration.
pub fn action<S, H, Fut, R>(schema: S, handler: H) -> FormAction<S, H>
where
    S: Schema,
    H: Fn(S::Output) -> Fut,
    Fut: Future<Output = Result<R, HandlerError>>,
    R: IntoOutcome,
{
    FormAction::new(schema, handler)
}

impl<S: Schema, H> FormAction<S, H> {
    /// Creates an action with the default configuration.
    pub fn new(schema: S, handler: H) -> Self {
        Self {
            schema,
            handler,
            decoder: FormDataDecoder::default(),
            config: ActionConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ActionConfig) -> Self {
        self.decoder = FormDataDecoder::new(config.decoder.clone());
        self.config = config;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    /// Runs the action against one submission.
    ///
    /// # Errors
    ///
    /// Returns the [`ControlSignal`] raised by the handler. Validation
    /// failures and handler faults are not errors; they come back as
    /// [`ActionResult::Invalid`] and [`ActionResult::Error`].
    pub async fn run<Fut, R>(&self, form: FormData) -> Result<ActionResult, ControlSignal>
    where
        H: Fn(S::Output) -> Fut,
        Fut: Future<Output = Result<R, HandlerError>>,
        R: IntoOutcome,
    {
        execute(&self.schema, &self.decoder, &self.config, form, |input| {
            (self.handler)(input)
        })
        .await
    }
}

/// A form action whose handler also receives a caller-supplied parameter,
/// such as the id of the record being edited.
pub struct ParamFormAction<S, H> {
    schema: S,
    handler: H,
    decoder: FormDataDecoder,
    config: ActionConfig,
}

/// Creates a [`ParamFormAction`] with the default configuration.
pub fn action_with_param<S, H, P, Fut, R>(schema: S, handler: H) -> ParamFormAction<S, H>
where
    S: Schema,
    H: Fn(P, S::Output) -> Fut,
    Fut: Future<Output = Result<R, HandlerError>>,
    R: IntoOutcome,
{
    ParamFormAction::new(schema, handler)
}

impl<S: Schema, H> ParamFormAction<S, H> {
    /// Creates an action with the default configuration.
    pub fn new(schema: S, handler: H) -> Self {
        Self {
            schema,
            handler,
            decoder: FormDataDecoder::default(),
            config: ActionConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ActionConfig) -> Self {
        self.decoder = FormDataDecoder::new(config.decoder.clone());
        self.config = config;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    /// Runs the action against one submission, passing `param` to the handler.
    ///
    /// # Errors
    ///
    /// Returns the [`ControlSignal`] raised by the handler.
    pub async fn run<P, Fut, R>(&self, param: P, form: FormData) -> Result<ActionResult, ControlSignal>
    where
        H: Fn(P, S::Output) -> Fut,
        Fut: Future<Output = Result<R, HandlerError>>,
        R: IntoOutcome,
    {
        execute(&self.schema, &self.decoder, &self.config, form, |input| {
            (self.handler)(param, input)
        })
        .await
    }
}

/// Error message used when a schema fails without naming any field.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Error message used when a handler fault has an empty message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

async fn execute<S, F, Fut, R>(
    schema: &S,
    decoder: &FormDataDecoder,
    config: &ActionConfig,
    form: FormData,
    call: F,
) -> Result<ActionResult, ControlSignal>
where
    S: Schema,
    F: FnOnce(S::Output) -> Fut,
    Fut: Future<Output = Result<R, HandlerError>>,
    R: IntoOutcome,
{
    let input = decoder.decode(form);

    let typed = match schema.validate(&input).await {
        Ok(typed) => typed,
        Err(invalid) if invalid.is_empty() => {
            tracing::warn!("schema rejected the submission without field messages");
            return Ok(ActionResult::error(input.to_json(), VALIDATION_FAILED));
        }
        Err(invalid) => {
            tracing::debug!(fields = invalid.len(), "form submission failed validation");
            return Ok(ActionResult::invalid(input.to_json(), invalid));
        }
    };

    // The handler takes ownership of the typed value.
    let data = match serde_json::to_value(&typed) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "validated form data is not serializable");
            return Ok(ActionResult::error(input.to_json(), e.to_string()));
        }
    };

    match call(typed).await {
        Ok(outcome) => match outcome.into_outcome() {
            Some(result) if result.invalid_fields().is_some_and(|e| !e.is_empty()) => {
                tracing::debug!("form action handler rejected the submission");
                Ok(result)
            }
            _ => {
                tracing::debug!("form action completed");
                Ok(ActionResult::success(data))
            }
        },
        Err(err) => {
            if let Some(signal) = err.control_signal(config) {
                tracing::debug!(signal = %signal, "form action raised a control signal");
                return Err(signal);
            }
            let mut message = err.message();
            if message.is_empty() {
                message = UNKNOWN_ERROR.to_string();
            }
            tracing::warn!(error = %message, "form action handler failed");
            Ok(ActionResult::error(data, message))
        }
    }
}
