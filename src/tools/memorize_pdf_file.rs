//! MCP `memorize_pdf_file` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `memorize_pdf_file` MCP tool.
///
/// The tool is stateless across calls: to walk a long document, pass the
/// `page` value named in the previous response's continuation instruction.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MemorizePdfFileParams {
    #[schemars(description = "Path to the PDF file on the server's filesystem")]
    pub file_path: String,

    #[schemars(
        description = "0-based page to start reading from. Defaults to 0. Use the value from the previous continuation instruction to read further windows."
    )]
    pub page: Option<usize>,

    #[schemars(description = "Optional metadata object to attach to the stored chunks")]
    pub metadata: Option<serde_json::Value>,
}
