//! MCP `memorize_text` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `memorize_text` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MemorizeTextParams {
    #[schemars(description = "The text to memorize")]
    pub text: String,

    #[schemars(
        description = "Optional metadata object stored with the text. Defaults to {\"topic\": \"memory\"}."
    )]
    pub metadata: Option<serde_json::Value>,
}
