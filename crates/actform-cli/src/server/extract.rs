// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request extractor for form submissions.

use actform::{parse_form_body, BodyParseError, FormData};
use axum::{
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Maximum body size to accept (1MB)
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// A submitted form, parsed from a URL-encoded or multipart body.
///
/// Must be the last extractor of a handler since it consumes the body.
#[derive(Debug, Clone)]
pub struct FormSubmission(pub FormData);

/// Why a request could not be read as a form submission.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionRejection {
    /// Request body exceeds the maximum allowed size.
    #[error("Request body too large (max {MAX_BODY_SIZE} bytes)")]
    TooLarge,

    /// The body is not form data.
    #[error(transparent)]
    Body(#[from] BodyParseError),
}

impl IntoResponse for SubmissionRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            SubmissionRejection::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            SubmissionRejection::Body(BodyParseError::UnsupportedContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            SubmissionRejection::Body(BodyParseError::InvalidMultipart(_)) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(status = %status, error = %self, "rejected form submission");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[axum::async_trait]
impl<S> FromRequest<S> for FormSubmission
where
    S: Send + Sync,
{
    type Rejection = SubmissionRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_SIZE)
            .await
            .map_err(|_| SubmissionRejection::TooLarge)?;

        let form = parse_form_body(&bytes, content_type.as_deref())?;
        tracing::debug!(entries = form.len(), "parsed form submission");
        Ok(Self(form))
    }
}
