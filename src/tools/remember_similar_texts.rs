//! MCP `remember_similar_texts` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `remember_similar_texts` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RememberSimilarTextsParams {
    #[schemars(description = "The text to find similar meanings for")]
    pub query_text: String,

    #[schemars(description = "Maximum number of results to return. Defaults to 5.")]
    pub n_results: Option<usize>,
}
