//! Client library for a Weaviate-compatible vector database.
//!
//! This crate provides:
//! - `VectorDbClient` for GraphQL queries, schema management and batch import
//! - `ClientConfig` built from [`vdb_types::Settings`] or by hand
//!
//! # Example
//!
//! ```rust,no_run
//! use vdb_client::{ClientConfig, VectorDbClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VectorDbClient::new(ClientConfig::new("http://localhost:8080/v1"))?;
//!
//!     let response = client
//!         .graphql("{ Get { JeopardyQuestion(limit: 2) { question answer } } }")
//!         .await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{ClientConfig, ImportOutcome, VectorDbClient, OPENAI_KEY_HEADER};
pub use error::ClientError;
