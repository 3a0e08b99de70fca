// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request body parsing into [`FormData`].
//!
//! Supports:
//! - `application/x-www-form-urlencoded` - URL-encoded form data
//! - `multipart/form-data` - text fields and file parts

use crate::form_data::{FileBlob, FormData, FormEntry};

/// Errors that can occur while parsing a form body.
#[derive(Debug, thiserror::Error)]
pub enum BodyParseError {
    /// The content type does not carry form data.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Multipart form data parsing failed.
    #[error("Invalid multipart data: {0}")]
    InvalidMultipart(String),
}

/// Parses a form submission body, keeping entry order and repeated keys.
pub fn parse_form_body(body: &[u8], content_type: Option<&str>) -> Result<FormData, BodyParseError> {
    let content_type = content_type.unwrap_or("");

    if content_type.contains("application/x-www-form-urlencoded") {
        return Ok(parse_form_urlencoded(body));
    }

    if content_type.contains("multipart/form-data") {
        return parse_multipart(body, content_type);
    }

    // Browsers always send a content type; an empty body without one is an empty form.
    if content_type.is_empty() && body.is_empty() {
        return Ok(FormData::new());
    }

    Err(BodyParseError::UnsupportedContentType(content_type.to_string()))
}

/// Parses URL-encoded form data.
pub fn parse_form_urlencoded(bytes: &[u8]) -> FormData {
    form_urlencoded::parse(bytes)
        .map(|(k, v)| (k.into_owned(), FormEntry::Text(v.into_owned())))
        .collect()
}

fn parse_multipart(bytes: &[u8], content_type: &str) -> Result<FormData, BodyParseError> {
    let boundary = content_type
        .split(';')
        .find(|s| s.trim().starts_with("boundary="))
        .and_then(|s| s.trim().strip_prefix("boundary="))
        .ok_or_else(|| BodyParseError::InvalidMultipart("Missing boundary".to_string()))?;

    let boundary = boundary.trim_matches('"');
    if boundary.is_empty() {
        return Err(BodyParseError::InvalidMultipart("Empty boundary".to_string()));
    }
    let delimiter = format!("--{}", boundary);
    let delimiter = delimiter.as_bytes();

    let mut form = FormData::new();

    for part in split_bytes(bytes, delimiter) {
        if part.starts_with(b"--") || trim_ascii(part).is_empty() {
            continue;
        }

        let Some(idx) = find_bytes(part, b"\r\n\r\n") else {
            continue;
        };

        let headers = String::from_utf8_lossy(&part[..idx]);
        let mut content = &part[idx + 4..];
        if content.ends_with(b"\r\n") {
            content = &content[..content.len() - 2];
        }

        let Some(name) = extract_disposition_param(&headers, "name") else {
            continue;
        };

        match extract_disposition_param(&headers, "filename") {
            Some(filename) => {
                let file = FileBlob::new(filename, extract_content_type(&headers), content.to_vec());
                form.push(name, file);
            }
            None => {
                form.push(name, String::from_utf8_lossy(content).into_owned());
            }
        }
    }

    Ok(form)
}

/// Extracts a `Content-Disposition` parameter such as `name` or `filename`.
fn extract_disposition_param(headers: &str, param: &str) -> Option<String> {
    let prefix = format!("{}=", param);
    for line in headers.lines() {
        if line.to_lowercase().starts_with("content-disposition:") {
            let value = line
                .split(';')
                .map(str::trim)
                .find_map(|s| s.strip_prefix(prefix.as_str()))?;
            return Some(value.trim_matches('"').to_string());
        }
    }
    None
}

fn extract_content_type(headers: &str) -> Option<String> {
    headers.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case("content-type")
            .then(|| value.trim().to_string())
    })
}

fn split_bytes<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
    let mut rest = Some(haystack);
    std::iter::from_fn(move || {
        let current = rest?;
        match find_bytes(current, needle) {
            Some(idx) => {
                rest = Some(&current[idx + needle.len()..]);
                Some(&current[..idx])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &bytes[start..end]
}
