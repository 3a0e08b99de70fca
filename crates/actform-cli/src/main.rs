// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use actform_cli::commands;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "actform")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Server-side form actions: decode submissions, run actions", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the demo form action server
    Serve {
        /// Port to run the server on (defaults to actform.toml, then 3000)
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind to (defaults to actform.toml, then 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
    },
    /// Decode a URL-encoded body and print the nested record as JSON
    Decode {
        /// The body to decode; read from stdin when omitted
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(host, port).await,
        Commands::Decode { body } => commands::decode::run(body),
    }
}
