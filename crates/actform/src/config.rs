// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Action and decoder configuration.
//!
//! Both structs deserialize with defaults for every field, so they can be
//! embedded in a larger config file:
//!
//! ```toml
//! [actions]
//! redirect_signal = "REDIRECT"
//! not_found_signal = "NOT_FOUND"
//!
//! [actions.decoder]
//! separator = "."
//! collisions = "nested-wins"
//! empty_file_is_absent = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ActionError, Result};

/// What happens when a dotted key and a plain key share a prefix,
/// e.g. both `a` and `a.b` are submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// The nested record replaces the scalar, whatever the submission order.
    #[default]
    NestedWins,
    /// The scalar stays; the dotted key is kept flat under its full name.
    KeepFlat,
}

/// Configuration for [`FormDataDecoder`](crate::FormDataDecoder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Separator splitting a key into a nested path (default: `.`).
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Policy for keys whose prefix is also submitted as a plain key.
    #[serde(default)]
    pub collisions: CollisionPolicy,

    /// Treat a file part with no name and no bytes as absent (default: true).
    #[serde(default = "default_true")]
    pub empty_file_is_absent: bool,
}

fn default_separator() -> char {
    '.'
}

fn default_true() -> bool {
    true
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            collisions: CollisionPolicy::default(),
            empty_file_is_absent: default_true(),
        }
    }
}

/// Configuration for [`FormAction`](crate::FormAction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Decoder settings.
    #[serde(default)]
    pub decoder: DecoderConfig,

    /// Fault message the hosting framework uses for redirects (default: `REDIRECT`).
    #[serde(default = "default_redirect_signal")]
    pub redirect_signal: String,

    /// Fault message the hosting framework uses for not-found (default: `NOT_FOUND`).
    #[serde(default = "default_not_found_signal")]
    pub not_found_signal: String,
}

fn default_redirect_signal() -> String {
    "REDIRECT".to_string()
}

fn default_not_found_signal() -> String {
    "NOT_FOUND".to_string()
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            decoder: DecoderConfig::default(),
            redirect_signal: default_redirect_signal(),
            not_found_signal: default_not_found_signal(),
        }
    }
}

impl ActionConfig {
    /// Checks the configuration for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Config`] when the signal messages are empty or
    /// identical, or when the separator is alphanumeric or whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.redirect_signal.is_empty() || self.not_found_signal.is_empty() {
            return Err(ActionError::Config("signal messages must not be empty".to_string()));
        }
        if self.redirect_signal == self.not_found_signal {
            return Err(ActionError::Config(format!(
                "redirect and not-found signals are both '{}'",
                self.redirect_signal
            )));
        }
        let sep = self.decoder.separator;
        if sep.is_alphanumeric() || sep.is_whitespace() {
            return Err(ActionError::Config(format!("unusable path separator '{}'", sep)));
        }
        Ok(())
    }
}
