// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the demo server.
//!
//! These tests drive the full pipeline over HTTP: body parsing, decoding,
//! validation, the handler and the response mapping.

use std::fs;

use actform::ActionConfig;
use actform_cli::config::{Config, CONFIG_FILE};
use actform_cli::server::{router, AppState};
use axum::http::{header, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::tempdir;

const URLENCODED: &str = "application/x-www-form-urlencoded";

fn test_server() -> TestServer {
    TestServer::new(router(AppState::default())).unwrap()
}

#[tokio::test]
async fn test_health() {
    let server = test_server();
    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_valid_contact_succeeds() {
    let server = test_server();
    let response = server
        .post("/contact")
        .text("name=Ada&email=ada%40example.org&message=Hello+there%2C+friends&topics=sales&topics=press")
        .content_type(URLENCODED)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["topics"], json!(["sales", "press"]));
    assert_eq!(body["data"]["message"], "Hello there, friends");
}

#[tokio::test]
async fn test_invalid_contact_returns_field_errors_and_input() {
    let server = test_server();
    let response = server
        .post("/contact")
        .text("name=Ada&email=&message=hi&company.size=lots")
        .content_type(URLENCODED)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "invalid");
    assert_eq!(body["success"], false);
    assert_eq!(body["invalid"]["email"], json!(["Email is required"]));
    assert!(body["invalid"]["message"].is_array());
    assert!(body["invalid"]["company.size"].is_array());
    assert_eq!(
        body["data"],
        json!({ "name": "Ada", "email": null, "message": "hi", "company": { "size": "lots" } })
    );
}

#[tokio::test]
async fn test_handler_error_is_reported() {
    let server = test_server();
    let response = server
        .post("/contact")
        .text("name=Ada&email=ada%40example.org&message=this+is+spam+honestly")
        .content_type(URLENCODED)
        .await;

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "Message rejected by the spam filter");
    assert_eq!(body["data"]["email"], "ada@example.org");
}

#[tokio::test]
async fn test_multipart_submission() {
    let server = test_server();
    let body = concat!(
        "--XyZ\r\n",
        "Content-Disposition: form-data; name=\"name\"\r\n\r\n",
        "Ada\r\n",
        "--XyZ\r\n",
        "Content-Disposition: form-data; name=\"email\"\r\n\r\n",
        "ada@example.org\r\n",
        "--XyZ\r\n",
        "Content-Disposition: form-data; name=\"message\"\r\n\r\n",
        "Sent as multipart\r\n",
        "--XyZ\r\n",
        "Content-Disposition: form-data; name=\"company.name\"\r\n\r\n",
        "Engines Ltd\r\n",
        "--XyZ--\r\n",
    );
    let response = server
        .post("/contact")
        .text(body)
        .content_type("multipart/form-data; boundary=XyZ")
        .await;

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["company"], json!({ "name": "Engines Ltd" }));
}

#[tokio::test]
async fn test_topic_redirect_and_not_found() {
    let server = test_server();
    let form = "name=Ada&email=ada%40example.org&message=Hello+there%2C+friends";

    let response = server
        .post("/contact/press")
        .text(form)
        .content_type(URLENCODED)
        .expect_failure()
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/press");

    let response = server
        .post("/contact/weather")
        .text(form)
        .content_type(URLENCODED)
        .expect_failure()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .post("/contact/support")
        .text(form)
        .content_type(URLENCODED)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "success");
}

#[tokio::test]
async fn test_unsupported_content_type_is_rejected() {
    let server = test_server();
    let response = server
        .post("/contact")
        .text(r#"{"name":"Ada"}"#)
        .content_type("application/json")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_configured_decoder_applies_to_requests() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[actions.decoder]\ncollisions = \"keep-flat\"\n").unwrap();
    let config = Config::load_from(&path).unwrap();
    assert_ne!(config.actions, ActionConfig::default());

    let server = TestServer::new(router(AppState {
        actions: config.actions,
    }))
    .unwrap();

    let response = server
        .post("/contact")
        .text("name=Ada&company=none&company.name=Engines")
        .content_type(URLENCODED)
        .await;

    let body: Value = response.json();
    assert_eq!(body["status"], "invalid");
    assert_eq!(body["data"]["company"], "none");
    assert_eq!(body["data"]["company.name"], "Engines");
}
