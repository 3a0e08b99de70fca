// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! axum adapter for form actions, and the demo server built on it.
//!
//! [`FormSubmission`] extracts a [`FormData`](actform::FormData) from a
//! request; [`ActionResponse`] turns what an action returns back into HTTP.

mod extract;
mod response;

pub use extract::{FormSubmission, SubmissionRejection, MAX_BODY_SIZE};
pub use response::ActionResponse;

use std::sync::Arc;

use actform::ActionConfig;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value as JsonValue};

use crate::demo;

/// Shared application state for the demo server.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Configuration applied to every action.
    pub actions: ActionConfig,
}

/// Builds the demo router.
///
/// - `POST /contact` runs the contact action
/// - `POST /contact/:topic` runs it for one topic
/// - `GET /health` reports liveness
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/contact", post(contact))
        .route("/contact/:topic", post(contact_topic))
        .with_state(Arc::new(state))
}

async fn health() -> Json<JsonValue> {
    Json(json!({ "status": "ok" }))
}

async fn contact(
    State(state): State<Arc<AppState>>,
    FormSubmission(form): FormSubmission,
) -> ActionResponse {
    ActionResponse(demo::run_contact(&state.actions, form).await)
}

async fn contact_topic(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
    FormSubmission(form): FormSubmission,
) -> ActionResponse {
    ActionResponse(demo::run_topic_contact(&state.actions, topic, form).await)
}
