//! MCP request types.
//!
//! Both tools accept the same `{file_path, config_path?}` object, so they
//! share one request struct. The derived JSON schema makes `file_path`
//! required at the protocol layer; a present-but-blank value is rejected by
//! the dispatcher before any filesystem or process work.

use rmcp::schemars;
use serde::Deserialize;

/// Target of a lint or fix operation.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MarkdownFileRequest {
    /// Path to the markdown file (absolute or relative)
    #[schemars(description = "Path to the markdown file to operate on (absolute or relative)")]
    pub file_path: String,
    /// Explicit config file path; overrides auto-discovery
    #[schemars(
        description = "Optional path to a markdownlint config file (.markdownlint.json). When omitted, the file's directory and its ancestors are searched for one."
    )]
    pub config_path: Option<String>,
}
