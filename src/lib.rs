//! MCP server exposing markdownlint to AI-assistant clients.
//!
//! Provides `lint_markdown` and `fix_markdown` tools via Model Context
//! Protocol, wrapping the external `markdownlint` CLI. Config files are
//! discovered from the target file's directory upward unless the caller
//! supplies an explicit path.
//!
//! ## Module Structure
//!
//! - `models`: Request types for MCP tools
//! - `config`: Config file discovery (ancestor walk)
//! - `linter`: Subprocess execution behind the `Linter` trait

mod config;
mod linter;
mod models;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

pub use config::{CONFIG_FILENAMES, find_config};
pub use linter::{
    CliLinter, DEFAULT_LINTER_BIN, DEFAULT_TIMEOUT, InvokeError, LintMode, Linter, ProcessResult,
};
pub use models::MarkdownFileRequest;

/// Returned as a successful tool result when the linter binary is missing:
/// the call itself succeeds, the content reports the operational problem.
const INSTALL_GUIDANCE: &str =
    "Error: markdownlint is not installed. Install it with: npm install -g markdownlint-cli";

/// Outcome of one invocation, consumed by the formatter.
///
/// A non-zero exit is the linter's normal way of reporting findings, so it is
/// a variant here rather than an error path.
enum LintOutcome {
    /// Exit 0.
    Clean(ProcessResult),
    /// Non-zero exit with diagnostics on stdout/stderr.
    IssuesFound(ProcessResult),
    /// The binary disappeared between the availability probe and the run.
    Unavailable,
}

/// MCP server wrapping the markdownlint CLI.
#[derive(Clone)]
pub struct MarkdownLintMcp {
    linter: Arc<dyn Linter>,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for MarkdownLintMcp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownLintMcp")
            .field("tool_router", &self.tool_router)
            .finish()
    }
}

impl MarkdownLintMcp {
    /// Create a server invoking `bin` with a per-invocation timeout.
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self::with_linter(Arc::new(CliLinter::new(bin, timeout)))
    }

    /// Create a server over any `Linter` implementation.
    pub fn with_linter(linter: Arc<dyn Linter>) -> Self {
        Self {
            linter,
            tool_router: Self::tool_router(),
        }
    }

    /// Request pipeline shared by both tools:
    /// Validate → CheckAvailability → ResolveConfig → Invoke → Format.
    ///
    /// Never returns an unhandled fault; unexpected errors become an
    /// "Error linting/fixing markdown: ..." text payload.
    async fn run(&self, req: MarkdownFileRequest, mode: LintMode) -> String {
        let file_path = req.file_path.trim();
        if file_path.is_empty() {
            return "Error: file_path is required".to_string();
        }

        match self.execute(file_path, req.config_path.as_deref(), mode).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(file = %file_path, mode = ?mode, "Unexpected failure: {e:#}");
                format!("Error {} markdown: {e:#}", mode.verb())
            }
        }
    }

    async fn execute(
        &self,
        file_path: &str,
        config_path: Option<&str>,
        mode: LintMode,
    ) -> anyhow::Result<String> {
        if !self.linter.check_available().await {
            return Ok(INSTALL_GUIDANCE.to_string());
        }

        let path = Path::new(file_path);
        if !path.exists() {
            return Ok(format!("Error: File not found: {file_path}"));
        }
        // Absolute path so results don't depend on the server's working
        // directory, mirroring what linter output will reference.
        let path = dunce::canonicalize(path)?;

        let config = resolve_config(&path, config_path);

        let outcome = match self.linter.invoke(&path, config.as_deref(), mode).await {
            Ok(result) if result.success() => LintOutcome::Clean(result),
            Ok(result) => LintOutcome::IssuesFound(result),
            Err(InvokeError::NotInstalled) => LintOutcome::Unavailable,
            Err(e) => return Err(e.into()),
        };

        Ok(format_outcome(mode, &path, &outcome))
    }
}

#[tool_router]
impl MarkdownLintMcp {
    #[tool(
        description = "Lint a markdown file using markdownlint. Returns linting errors and warnings with line numbers, rule names, and descriptions."
    )]
    #[tracing::instrument(skip(self, req), name = "mcp.lint_markdown")]
    async fn lint_markdown(&self, Parameters(req): Parameters<MarkdownFileRequest>) -> String {
        self.run(req, LintMode::Check).await
    }

    #[tool(
        description = "Automatically fix markdown linting issues where possible, modifying the file in place. Returns the result of the fix operation."
    )]
    #[tracing::instrument(skip(self, req), name = "mcp.fix_markdown")]
    async fn fix_markdown(&self, Parameters(req): Parameters<MarkdownFileRequest>) -> String {
        self.run(req, LintMode::Fix).await
    }
}

/// Effective config path: an explicit non-empty argument always wins;
/// auto-discovery runs only when none was given.
fn resolve_config(file: &Path, explicit: Option<&str>) -> Option<PathBuf> {
    match explicit {
        Some(p) if !p.trim().is_empty() => Some(PathBuf::from(p)),
        _ => find_config(file),
    }
}

/// Render an outcome as the single text payload the protocol expects.
fn format_outcome(mode: LintMode, file: &Path, outcome: &LintOutcome) -> String {
    let file = file.display();
    match (mode, outcome) {
        (_, LintOutcome::Unavailable) => INSTALL_GUIDANCE.to_string(),
        (LintMode::Check, LintOutcome::Clean(_)) => {
            format!("✓ No linting errors found in {file}")
        }
        (LintMode::Check, LintOutcome::IssuesFound(result)) => {
            let body = result
                .diagnostics()
                .unwrap_or("Issues found but no detailed output.");
            format!("Linting errors found in {file}:\n\n{body}")
        }
        (LintMode::Fix, LintOutcome::Clean(result)) => {
            let out = result.stdout.trim_end();
            if out.trim().is_empty() {
                format!("✓ Fixed linting issues in {file}")
            } else {
                format!("✓ Fixed linting issues in {file}\n\n{out}")
            }
        }
        (LintMode::Fix, LintOutcome::IssuesFound(result)) => {
            let body = result
                .diagnostics()
                .unwrap_or("Run lint_markdown to list the remaining issues.");
            format!("Fixed some issues in {file}, but some remain:\n\n{body}")
        }
    }
}

#[tool_handler]
impl ServerHandler for MarkdownLintMcp {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.instructions = Some(
            "Markdownlint MCP server. Lints markdown files and applies automatic fixes \
             via the markdownlint CLI; config files are discovered from the target \
             file's directory upward unless an explicit path is given."
                .into(),
        );
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info
    }
}
