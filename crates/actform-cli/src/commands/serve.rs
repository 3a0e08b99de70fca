// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Demo server command.

use console::style;

use crate::config::Config;
use crate::server::{self, AppState};

/// Runs the demo server. Command-line values override `actform.toml`.
pub async fn run(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);

    let app = server::router(AppState {
        actions: config.actions,
    });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "form action server listening");

    println!("{}", style("Starting actform demo server...").cyan().bold());
    println!();
    println!("  {} http://{}/contact", style("POST").green(), addr);
    println!("  {} http://{}/contact/:topic", style("POST").green(), addr);
    println!("  {}  http://{}/health", style("GET").green(), addr);
    println!();
    println!("{}", style("Press Ctrl+C to stop").dim());

    axum::serve(listener, app).await?;
    Ok(())
}
