//! MCP `memorize_multiple_texts` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `memorize_multiple_texts` MCP tool.
///
/// The batch is all-or-nothing: if any text fails to embed, nothing is stored.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MemorizeMultipleTextsParams {
    #[schemars(description = "The texts to memorize, e.g. chunks of a larger document")]
    pub texts: Vec<String>,

    #[schemars(
        description = "Optional metadata object stored with every text in the batch. Defaults to {\"topic\": \"memory\"}."
    )]
    pub metadata: Option<serde_json::Value>,
}
