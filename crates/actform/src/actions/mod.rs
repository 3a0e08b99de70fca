// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Form actions.
//!
//! A form action wraps a [`Schema`] and a handler. Running it against a
//! submission always yields an [`ActionResult`]:
//!
//! - the schema rejects the input → [`ActionResult::Invalid`], with the
//!   submitted values so the form can be re-filled;
//! - the handler returns an invalid result with field messages (see
//!   [`set_invalid`]) → that result, unchanged;
//! - the handler completes → [`ActionResult::Success`];
//! - the handler fails → [`ActionResult::Error`].
//!
//! The one exception is a framework control signal (redirect, not found):
//! it is handed back as `Err(ControlSignal)` for the hosting framework.
//!
//! # Example
//!
//! ```rust,ignore
//! use actform::{action_with_param, set_invalid, HandlerError};
//!
//! let rename = action_with_param(project_schema, |id: u64, project: Project| async move {
//!     let Some(existing) = store.find(id).await? else {
//!         return Err(HandlerError::not_found());
//!     };
//!     if store.name_taken(&project.name).await? {
//!         return Ok(Some(set_invalid(&project, "name", "Name already in use")));
//!     }
//!     store.rename(existing, &project.name).await?;
//!     Ok(None)
//! });
//! ```

mod executor;
mod handler;
mod result;
mod schema;

pub use executor::{
    action, action_with_param, FormAction, ParamFormAction, UNKNOWN_ERROR, VALIDATION_FAILED,
};
pub use handler::{HandlerError, IntoOutcome};
pub use result::{set_invalid, ActionResult, FieldErrors, ResultStatus};
pub use schema::{schema_fn, FnSchema, Schema};
