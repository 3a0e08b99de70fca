// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! actform CLI library.
//!
//! Hosts actform form actions behind an axum server and provides a few
//! tools around the decoder.
//!
//! # Features
//!
//! - **axum adapter**: a [`server::FormSubmission`] extractor and JSON
//!   responses for action results, with redirect and not-found mapped to
//!   HTTP
//! - **Demo contact form** exercising validation, handler rejection and
//!   control signals
//! - **Decoder tool** that prints the nested record for a URL-encoded body
//!
//! # Usage
//!
//! ```bash
//! actform serve                           # Start the demo server
//! actform decode 'tags=a&tags=b&user.name=Ada'
//! ```
//!
//! # Configuration
//!
//! Read from `actform.toml` in the working directory.

/// CLI commands (serve, decode).
pub mod commands;
/// Configuration from `actform.toml`.
pub mod config;
/// Demo contact form action.
pub mod demo;
/// axum adapter and demo server.
pub mod server;
