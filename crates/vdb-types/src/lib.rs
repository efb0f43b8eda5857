//! # vdb-types
//!
//! Shared domain types for the vector-database recipes.
//!
//! This crate defines:
//! - Object ids: deterministic identifiers derived from natural keys
//! - Schema: class and property definitions, plus the canned recipe classes
//! - Objects: data objects and batch import results
//! - Datasets: Jeopardy record formats and their conversion to objects
//! - Settings: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use vdb_types::derive_object_id;
//!
//! let id = derive_object_id("Question A");
//! assert_eq!(id, derive_object_id("question a"));
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod object;
pub mod object_id;
pub mod schema;

pub use config::Settings;
pub use dataset::{
    load_jeopardy_file, parse_jeopardy_records, parse_tutorial_records, sample_articles,
    JeopardyRecord, TutorialRecord,
};
pub use error::DemoError;
pub use object::{BatchObjectResult, BatchSummary, DataObject, FailedObject, NO_RESULT_MESSAGE};
pub use object_id::{derive_object_id, ObjectId};
pub use schema::{article_class, jeopardy_question_class, question_class, Class, Property, Schema};
