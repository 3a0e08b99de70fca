// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The schema capability.

use std::future::Future;

use serde::Serialize;

use super::FieldErrors;
use crate::value::DecodedInput;

/// Validates decoded input into a typed value.
///
/// actform does not ship a validation engine. Implement this trait over the
/// validator of your choice, or wrap a closure with [`schema_fn`].
///
/// Validation may suspend (a uniqueness check against a database, say); the
/// returned future must be `Send` so actions can run inside a multi-threaded
/// server.
pub trait Schema: Send + Sync {
    /// The typed value produced by successful validation. It is serialized
    /// into the `data` of success and error results.
    type Output: Serialize + Send;

    /// Validates the input, returning the typed value or per-field messages.
    fn validate(
        &self,
        input: &DecodedInput,
    ) -> impl Future<Output = Result<Self::Output, FieldErrors>> + Send;
}

/// A [`Schema`] backed by an async closure. Created by [`schema_fn`].
#[derive(Debug, Clone)]
pub struct FnSchema<F>(F);

/// Wraps an async closure as a [`Schema`].
///
/// The closure receives its own copy of the decoded input.
///
/// ```rust
/// use actform::{schema_fn, FieldErrors};
///
/// let schema = schema_fn(|input| async move {
///     input
///         .get_text("email")
///         .map(str::to_string)
///         .ok_or_else(|| FieldErrors::single("email", "Required"))
/// });
/// ```
pub fn schema_fn<F, Fut, T>(f: F) -> FnSchema<F>
where
    F: Fn(DecodedInput) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, FieldErrors>> + Send,
    T: Serialize + Send,
{
    FnSchema(f)
}

impl<F, Fut, T> Schema for FnSchema<F>
where
    F: Fn(DecodedInput) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, FieldErrors>> + Send,
    T: Serialize + Send,
{
    type Output = T;

    fn validate(&self, input: &DecodedInput) -> impl Future<Output = Result<T, FieldErrors>> + Send {
        (self.0)(input.clone())
    }
}
