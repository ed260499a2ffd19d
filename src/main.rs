//! Markdownlint MCP server binary.
//!
//! Exposes `lint_markdown` and `fix_markdown` tools to MCP clients (Claude
//! Code, Gemini CLI, opencode) over stdio, wrapping the markdownlint CLI.
//!
//! Usage:
//!   markdownlint-mcp
//!   markdownlint-mcp --linter /usr/local/bin/markdownlint --timeout-secs 60
//!
//! Test with MCP inspector:
//!   npx @modelcontextprotocol/inspector cargo run

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{EnvFilter, fmt};

use markdownlint_mcp::{DEFAULT_LINTER_BIN, MarkdownLintMcp};

/// MCP server wrapping the markdownlint CLI.
#[derive(Parser, Debug)]
#[command(name = "markdownlint-mcp")]
#[command(about = "MCP server exposing markdownlint lint and auto-fix tools")]
struct Args {
    /// Linter executable to invoke (resolved via PATH)
    #[arg(long, default_value = DEFAULT_LINTER_BIN)]
    linter: String,

    /// Maximum wall-clock seconds a single linter invocation may run
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing to stderr (MCP uses stdio for protocol)
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    tracing::info!(
        linter = %args.linter,
        timeout_secs = args.timeout_secs,
        "Starting markdownlint MCP server"
    );

    let mcp = MarkdownLintMcp::new(&args.linter, Duration::from_secs(args.timeout_secs));

    let service = mcp.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("MCP server error: {:?}", e);
    })?;

    tracing::info!("markdownlint-mcp server ready");

    service.waiting().await?;

    tracing::info!("markdownlint-mcp server shutting down");
    Ok(())
}
