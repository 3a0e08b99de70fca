// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `serve`: Run the demo form action server
//! - `decode`: Print the decoded form of a URL-encoded body

/// Body decoding command.
pub mod decode;
/// Demo server command.
pub mod serve;
