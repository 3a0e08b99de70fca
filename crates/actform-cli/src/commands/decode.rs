// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Body decoding command.

use std::io::Read;

use actform::{body::parse_form_urlencoded, DecoderConfig, FormDataDecoder};
use serde_json::Value as JsonValue;

use crate::config::Config;

/// Decodes a URL-encoded body (the argument, or stdin) with the configured
/// decoder and prints the nested record as pretty JSON.
pub fn run(body: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;

    let body = match body {
        Some(body) => body,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let decoded = decode_body(&config.actions.decoder, body.trim_end());
    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}

/// Decodes a URL-encoded body into its nested JSON form.
pub fn decode_body(config: &DecoderConfig, body: &str) -> JsonValue {
    let form = parse_form_urlencoded(body.as_bytes());
    FormDataDecoder::new(config.clone()).decode(form).to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actform::CollisionPolicy;
    use serde_json::json;

    #[test]
    fn test_decode_body() {
        let decoded = decode_body(
            &DecoderConfig::default(),
            "tags=a&tags=b&user.name=Ada&user.address.city=London&note=",
        );
        assert_eq!(
            decoded,
            json!({
                "tags": ["a", "b"],
                "user": { "name": "Ada", "address": { "city": "London" } },
                "note": null,
            })
        );
    }

    #[test]
    fn test_decode_body_respects_collision_policy() {
        let config = DecoderConfig {
            collisions: CollisionPolicy::KeepFlat,
            ..DecoderConfig::default()
        };
        assert_eq!(
            decode_body(&config, "a=x&a.b=y"),
            json!({ "a": "x", "a.b": "y" })
        );
        assert_eq!(
            decode_body(&DecoderConfig::default(), "a=x&a.b=y"),
            json!({ "a": { "b": "y" } })
        );
    }
}
