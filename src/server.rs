//! MCP server initialization for stdio and Streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that wire up the
//! embedding client, vector store client, PDF page source, and MCP tool
//! handler into a running server.

use crate::config::MnemoConfig;
use crate::embedding;
use crate::ingest::{pdfium::PdfiumPageSource, PageSource};
use crate::store;
use crate::tools::MnemoTools;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Shared setup: create the embedding and store clients from config.
fn setup_shared_state(
    config: MnemoConfig,
) -> Result<(
    Arc<dyn embedding::Embedder>,
    Arc<dyn store::VectorStore>,
    Arc<dyn PageSource>,
    Arc<MnemoConfig>,
)> {
    let embedder = embedding::create_embedder(&config)?;
    tracing::info!(url = %config.embedding_url(), model = %config.embedding.model, "embedding client ready");

    let vector_store = store::create_store(&config)?;
    tracing::info!(url = %config.store_url(), collection = %config.store.collection, "vector store client ready");

    let pages: Arc<dyn PageSource> = Arc::new(PdfiumPageSource);

    Ok((embedder, vector_store, pages, Arc::new(config)))
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: MnemoConfig) -> Result<()> {
    tracing::info!("starting mnemo MCP server on stdio");

    let (embedder, vector_store, pages, config) = setup_shared_state(config)?;

    let tools = MnemoTools::new(embedder, vector_store, pages, config);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running — waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
pub async fn serve_http(config: MnemoConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    tracing::info!(addr = %bind_addr, "starting mnemo MCP server on HTTP");

    let (embedder, vector_store, pages, config) = setup_shared_state(config)?;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || {
            Ok(MnemoTools::new(
                embedder.clone(),
                vector_store.clone(),
                pages.clone(),
                config.clone(),
            ))
        },
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
