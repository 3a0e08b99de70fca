// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Demo contact form.
//!
//! Fields: `name`, `email`, `message`, repeated `topics`, and an optional
//! nested `company.name` / `company.size`.

use std::future::{ready, Future};

use actform::{
    action, action_with_param, set_invalid, ActionConfig, ActionResult, ControlSignal,
    DecodedInput, FieldErrors, FormData, HandlerError, Schema,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Topics accepted by `POST /contact/:topic`.
pub const TOPICS: &[&str] = &["sales", "support", "press"];

const MIN_MESSAGE_LEN: usize = 10;

/// A validated contact request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    /// Sender name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Message body.
    pub message: String,
    /// Selected topics, in submission order.
    pub topics: Vec<String>,
    /// Sender's company, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

/// Company details nested under `company.*`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Headcount, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Validates the contact form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactSchema;

impl Schema for ContactSchema {
    type Output = Contact;

    fn validate(
        &self,
        input: &DecodedInput,
    ) -> impl Future<Output = Result<Contact, FieldErrors>> + Send {
        ready(validate_contact(input))
    }
}

fn validate_contact(input: &DecodedInput) -> Result<Contact, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = input.get_text("name").map(str::trim).unwrap_or_default();
    if name.is_empty() {
        errors.add("name", "Name is required");
    }

    let email = input.get_text("email").map(str::trim).unwrap_or_default();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.add("email", "Invalid email address");
    }

    let message = input.get_text("message").map(str::trim).unwrap_or_default();
    if message.chars().count() < MIN_MESSAGE_LEN {
        errors.add(
            "message",
            format!("Message must be at least {MIN_MESSAGE_LEN} characters"),
        );
    }

    let topics: Vec<String> = input
        .get_texts("topics")
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let company = match input.get("company").and_then(|v| v.as_map()) {
        Some(company) => {
            let size = match company.get_text("size") {
                Some(size) => match size.parse::<u32>() {
                    Ok(size) => Some(size),
                    Err(_) => {
                        errors.add("company.size", "Company size must be a number");
                        None
                    }
                },
                None => None,
            };
            match company.get_text("name") {
                Some(name) => Some(Company {
                    name: name.to_string(),
                    size,
                }),
                None => {
                    errors.add("company.name", "Company name is required with company details");
                    None
                }
            }
        }
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Contact {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        topics,
        company,
    })
}

/// Handles a validated contact request.
///
/// `taken@example.com` is reported as already used, and a message
/// mentioning "spam" fails the action.
pub async fn submit_contact(contact: Contact) -> Result<Option<ActionResult>, HandlerError> {
    if contact.email.eq_ignore_ascii_case("taken@example.com") {
        return Ok(Some(set_invalid(
            &contact,
            "email",
            "This email has already been used",
        )));
    }
    if contact.message.to_lowercase().contains("spam") {
        return Err(HandlerError::msg("Message rejected by the spam filter"));
    }
    tracing::info!(email = %contact.email, topics = contact.topics.len(), "contact request received");
    Ok(None)
}

/// Handles a contact request for one topic.
///
/// Unknown topics are not found; press requests redirect to the press page.
pub async fn submit_topic_contact(
    topic: String,
    contact: Contact,
) -> Result<Option<ActionResult>, HandlerError> {
    if !TOPICS.contains(&topic.as_str()) {
        return Err(HandlerError::not_found());
    }
    if topic == "press" {
        return Err(HandlerError::redirect("/press"));
    }
    submit_contact(contact).await
}

/// Runs the contact action against one submission.
pub async fn run_contact(
    config: &ActionConfig,
    form: FormData,
) -> Result<ActionResult, ControlSignal> {
    action(ContactSchema, submit_contact)
        .with_config(config.clone())
        .run(form)
        .await
}

/// Runs the topic contact action against one submission.
pub async fn run_topic_contact(
    config: &ActionConfig,
    topic: String,
    form: FormData,
) -> Result<ActionResult, ControlSignal> {
    action_with_param(ContactSchema, submit_topic_contact)
        .with_config(config.clone())
        .run(topic, form)
        .await
}
