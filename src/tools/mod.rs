pub mod memorize_multiple_texts;
pub mod memorize_pdf_file;
pub mod memorize_text;
pub mod remember_similar_texts;

use memorize_multiple_texts::MemorizeMultipleTextsParams;
use memorize_pdf_file::MemorizePdfFileParams;
use memorize_text::MemorizeTextParams;
use remember_similar_texts::RememberSimilarTextsParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::MnemoConfig;
use crate::embedding::Embedder;
use crate::ingest::{self, PageSource};
use crate::memory::{memorize, recall, RelevanceThresholds};
use crate::store::VectorStore;

const SERVER_NAME: &str = "mnemo memory server";

/// The mnemo MCP tool handler. Holds shared state (embedding client, vector
/// store, page source, config) and exposes all MCP tools via the
/// `#[tool_router]` macro.
///
/// Every tool returns a plain report string and never propagates a fault to
/// the MCP client: service errors are rendered into the message.
#[derive(Clone)]
pub struct MnemoTools {
    tool_router: ToolRouter<Self>,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    pages: Arc<dyn PageSource>,
    config: Arc<MnemoConfig>,
}

#[tool_router]
impl MnemoTools {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        pages: Arc<dyn PageSource>,
        config: Arc<MnemoConfig>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            embedder,
            store,
            pages,
            config,
        }
    }

    fn thresholds(&self) -> RelevanceThresholds {
        RelevanceThresholds::from(&self.config.retrieval)
    }

    /// Greet the user with the server's name.
    #[tool(description = "Greet the user with the server's name.")]
    async fn greet_user(&self) -> String {
        format!("Hello! I am the {SERVER_NAME}.")
    }

    /// Memorize a single text for later retrieval by meaning.
    #[tool(
        description = "Memorize a text for later retrieval based on relevance in meaning, not just keywords."
    )]
    async fn memorize_text(&self, Parameters(params): Parameters<MemorizeTextParams>) -> String {
        tracing::info!(text_len = params.text.len(), "memorize_text called");

        let texts = vec![params.text];
        match memorize::memorize(&self.embedder, &self.store, &texts, params.metadata).await {
            Ok(_) => "Text stored successfully.".to_string(),
            Err(e) => format!("Text was not stored: {e}"),
        }
    }

    /// Memorize a batch of texts. All-or-nothing on embedding failure.
    #[tool(
        description = "Memorize multiple texts for later retrieval based on relevance in meaning, not just keywords. The batch is all-or-nothing: if any text fails to embed, nothing is stored."
    )]
    async fn memorize_multiple_texts(
        &self,
        Parameters(params): Parameters<MemorizeMultipleTextsParams>,
    ) -> String {
        tracing::info!(count = params.texts.len(), "memorize_multiple_texts called");

        match memorize::memorize(&self.embedder, &self.store, &params.texts, params.metadata)
            .await
        {
            Ok(receipt) => format!("All {} texts stored successfully.", receipt.count),
            Err(e) => format!("No texts were stored: {e}"),
        }
    }

    /// Query memory for texts similar in meaning to the query text.
    #[tool(
        description = "Query memory for texts similar in meaning to the query text. Returns ranked results with a relevance label and distance per result."
    )]
    async fn remember_similar_texts(
        &self,
        Parameters(params): Parameters<RememberSimilarTextsParams>,
    ) -> String {
        let k = params
            .n_results
            .unwrap_or(self.config.retrieval.default_results);
        tracing::info!(query_len = params.query_text.len(), k, "remember_similar_texts called");

        match recall::recall(
            &self.embedder,
            &self.store,
            &params.query_text,
            k,
            &self.thresholds(),
        )
        .await
        {
            Ok(report) => report.render(),
            Err(e) => format!("Could not process the query: {e}"),
        }
    }

    /// Read a window of PDF pages and instruct the agent to chunk and store them.
    #[tool(
        description = "Experimental: read a window of pages from a PDF file and return its text with instructions to chunk and memorize it. Stateless — follow the continuation instruction in the response to read further pages."
    )]
    async fn memorize_pdf_file(
        &self,
        Parameters(params): Parameters<MemorizePdfFileParams>,
    ) -> String {
        let start_page = params.page.unwrap_or(0);
        let window = self.config.ingest.page_window;
        tracing::info!(file = %params.file_path, start_page, "memorize_pdf_file called");

        // Native PDF reads are blocking work
        let pages = Arc::clone(&self.pages);
        let path = PathBuf::from(&params.file_path);
        let result = tokio::task::spawn_blocking(move || {
            ingest::prepare_window(pages.as_ref(), &path, start_page, window)
        })
        .await;

        match result {
            Ok(Ok(instructions)) => {
                let mut report = instructions.render();
                if let Some(metadata) = params.metadata {
                    report.push_str(&format!(
                        "\n\nAttach this metadata when storing the chunks: {metadata}"
                    ));
                }
                report
            }
            Ok(Err(e)) => format!("Could not prepare the PDF: {e}"),
            Err(e) => format!("Could not prepare the PDF: task failed: {e}"),
        }
    }
}

#[tool_handler]
impl ServerHandler for MnemoTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "mnemo is a semantic memory server. Use memorize_text or \
                 memorize_multiple_texts to store texts, remember_similar_texts to \
                 retrieve them by meaning, and memorize_pdf_file to ingest PDF \
                 documents window by window."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
