//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Embeddings (ONNX sentence-transformer, deterministic mock)
//! - Catalog loading from spreadsheets and CSV
//! - Chat platform signatures and Web API, external serving endpoint
//! - HTTP server, CLI controllers and the dependency container

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
