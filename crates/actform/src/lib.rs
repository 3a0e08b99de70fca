// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # actform
//!
//! Server-side form actions for Rust.
//!
//! actform sits between a submitted form and your business logic. It
//! decodes the multi-valued submission into a nested record, runs a schema
//! over it, calls your handler, and hands back one [`ActionResult`] the view
//! layer can render without guessing.
//!
//! ## Features
//!
//! - `FormData` decoding with repeated-key grouping and dotted-key nesting
//! - Async [`Schema`] capability, bring your own validator
//! - Four-variant [`ActionResult`] (idle, success, invalid, error)
//! - Framework control-flow signals (redirect, not found) pass through untouched
//! - View bindings ([`FormScope`], [`FieldScope`]) for rendering field errors
//!
//! ## Quick Start
//!
//! ```rust
//! use actform::{action, schema_fn, FieldErrors, FormData, HandlerError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), actform::ControlSignal> {
//! let schema = schema_fn(|input| async move {
//!     match input.get_text("email") {
//!         Some(email) => Ok(email.to_string()),
//!         None => Err(FieldErrors::single("email", "Required")),
//!     }
//! });
//!
//! let subscribe = action(schema, |email: String| async move {
//!     tracing::info!("subscribing {email}");
//!     Ok::<_, HandlerError>(())
//! });
//!
//! let form = FormData::from_pairs([("email", "a@b.com")]);
//! let result = subscribe.run(form).await?;
//! assert!(result.is_success());
//! # Ok(())
//! # }
//! ```

/// Form action builder, handler and schema capabilities.
pub mod actions;
/// Request body parsing into [`FormData`].
pub mod body;
/// Action and decoder configuration.
pub mod config;
/// Decoding of flat submissions into nested records.
pub mod decode;
/// Error types.
pub mod error;
/// The submitted form representation.
pub mod form_data;
/// Decoded input values.
pub mod value;
/// View bindings that read an action result back into form controls.
pub mod view;

pub use actions::{
    action, action_with_param, schema_fn, set_invalid, ActionResult, FieldErrors, FnSchema,
    FormAction, HandlerError, IntoOutcome, ParamFormAction, ResultStatus, Schema,
};
pub use body::{parse_form_body, BodyParseError};
pub use config::{ActionConfig, CollisionPolicy, DecoderConfig};
pub use decode::{decode, FormDataDecoder};
pub use error::{ActionError, ControlSignal, Result};
pub use form_data::{FileBlob, FormData, FormEntry};
pub use value::{DecodedInput, FormValue};
pub use view::{
    initial_state, FieldMessage, FieldScope, FormScope, InputProps, LabelProps, Toast, ToastKind,
    ToastMessages,
};
