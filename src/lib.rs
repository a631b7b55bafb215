//! Semantic memory for AI agents — store texts and recall them by meaning, via MCP.
//!
//! mnemo is an [MCP](https://modelcontextprotocol.io/) server that lets an agent
//! memorize free-text snippets and later retrieve the ones most similar in
//! meaning to a query. Texts are embedded by a local Ollama instance and stored
//! in a Chroma vector database; retrieval classifies each match's distance into
//! a human-readable relevance band. An experimental PDF tool walks a document
//! window by window and hands the agent text to chunk and memorize, using a
//! stateless continuation protocol.
//!
//! # Architecture
//!
//! - **Embeddings**: Ollama `/api/embeddings` (all-minilm:l6-v2 by default)
//! - **Storage**: Chroma HTTP API, one well-known collection, cosine space
//! - **Transport**: MCP over stdio (primary) or Streamable HTTP
//!
//! Both external services sit behind traits ([`embedding::Embedder`],
//! [`store::VectorStore`]) so the core logic is testable without a network.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`embedding`] — Embedding client for the external embedding service
//! - [`store`] — Vector store adapter for the external Chroma service
//! - [`memory`] — Core memory engine: memorize and recall
//! - [`ingest`] — PDF pagination protocol and page extraction

pub mod config;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod memory;
pub mod store;
