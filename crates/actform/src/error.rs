// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for actform.
//!
//! Most failures in a form action are not errors at all: validation
//! failures and handler faults are recovered into an
//! [`ActionResult`](crate::ActionResult). What remains lives here.
//!
//! # Error Categories
//!
//! - **Control signals**: redirect / not-found conditions owned by the
//!   hosting framework. They must leave the action untouched.
//! - **Body errors**: the request body could not be read as form data
//! - **Serialization errors**: a value could not be turned into plain data
//! - **Configuration errors**: an [`ActionConfig`](crate::ActionConfig) is unusable

use thiserror::Error;

use crate::body::BodyParseError;

/// A framework-owned control-flow condition raised by a handler.
///
/// These are not application errors. An action re-raises them unchanged
/// so the hosting framework can redirect or render its not-found page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlSignal {
    /// The handler asked the framework to redirect.
    #[error("redirect signal{}", location.as_deref().map(|l| format!(" to {l}")).unwrap_or_default())]
    Redirect {
        /// Target location, when the handler provided one.
        location: Option<String>,
    },

    /// The handler asked the framework to render its not-found response.
    #[error("not-found signal")]
    NotFound,
}

impl ControlSignal {
    /// Creates a redirect signal to the given location.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: Some(location.into()),
        }
    }
}

/// The main error type for actform operations.
#[derive(Error, Debug)]
pub enum ActionError {
    /// A handler raised a framework control-flow signal.
    #[error("Control signal: {0}")]
    Control(#[from] ControlSignal),

    /// The request body could not be parsed as form data.
    #[error("Body error: {0}")]
    Body(#[from] BodyParseError),

    /// A value could not be serialized to plain data.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience type alias for Results with [`ActionError`].
pub type Result<T> = std::result::Result<T, ActionError>;
