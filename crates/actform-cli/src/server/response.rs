// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP responses for action outcomes.

use actform::{ActionResult, ControlSignal};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;

/// What a form action returned, as an HTTP response.
///
/// Every [`ActionResult`] is sent as JSON with status 200, since invalid
/// and error results are ordinary form states. A redirect signal becomes
/// `303 See Other` (to `/` when it names no location) and not-found
/// becomes `404`.
#[derive(Debug, Clone)]
pub struct ActionResponse(pub Result<ActionResult, ControlSignal>);

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(result) => Json(result).into_response(),
            Err(ControlSignal::Redirect { location }) => {
                Redirect::to(location.as_deref().unwrap_or("/")).into_response()
            }
            Err(ControlSignal::NotFound) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_results_are_ok() {
        let response = ActionResponse(Ok(ActionResult::error(json!({}), "boom"))).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_redirect_is_see_other() {
        let response = ActionResponse(Err(ControlSignal::redirect("/thanks"))).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/thanks");

        let response = ActionResponse(Err(ControlSignal::Redirect { location: None })).into_response();
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[test]
    fn test_not_found() {
        let response = ActionResponse(Err(ControlSignal::NotFound)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
