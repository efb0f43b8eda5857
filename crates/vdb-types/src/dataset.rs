//! Source datasets and their conversion into data objects.
//!
//! Two Jeopardy exports are supported:
//! - `jeopardy_100.json`: records with `round`, `value`, `question`, `answer`,
//!   imported into `JeopardyQuestion`
//! - `jeopardy_tiny.json` from the quickstart tutorial: records with
//!   `Category`, `Question`, `Answer`, imported into `Question`
//!
//! Both are keyed by the identifier derived from the question text.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::DemoError;
use crate::object::DataObject;

/// Class name for [`JeopardyRecord`] objects.
pub const JEOPARDY_CLASS: &str = "JeopardyQuestion";

/// Class name for [`TutorialRecord`] objects.
pub const QUESTION_CLASS: &str = "Question";

/// Class name for [`sample_articles`] objects.
pub const ARTICLE_CLASS: &str = "Article";

/// Location of the quickstart tutorial dataset.
pub const TUTORIAL_DATASET_URL: &str =
    "https://raw.githubusercontent.com/weaviate-tutorials/quickstart/main/data/jeopardy_tiny.json";

/// A record of `jeopardy_100.json`.
///
/// Keys are matched in lowercase or capitalized form, since exports of the
/// dataset use both. Missing or null fields read as empty or zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JeopardyRecord {
    #[serde(default, alias = "Round", deserialize_with = "null_as_default")]
    pub round: String,

    #[serde(default, alias = "Value", deserialize_with = "null_as_default")]
    pub value: i64,

    #[serde(default, alias = "Question", deserialize_with = "null_as_default")]
    pub question: String,

    #[serde(default, alias = "Answer", deserialize_with = "null_as_default")]
    pub answer: String,
}

impl JeopardyRecord {
    pub fn to_object(&self) -> DataObject {
        DataObject::new(JEOPARDY_CLASS)
            .with_derived_id(&self.question)
            .with_property("round", self.round.as_str())
            .with_property("value", self.value)
            .with_property("question", self.question.as_str())
            .with_property("answer", self.answer.as_str())
    }
}

/// A record of the quickstart `jeopardy_tiny.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TutorialRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
}

impl TutorialRecord {
    pub fn to_object(&self) -> DataObject {
        DataObject::new(QUESTION_CLASS)
            .with_derived_id(&self.question)
            .with_property("category", self.category.as_str())
            .with_property("question", self.question.as_str())
            .with_property("answer", self.answer.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse `jeopardy_100.json` content.
pub fn parse_jeopardy_records(bytes: &[u8]) -> Result<Vec<JeopardyRecord>, DemoError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read and parse a `jeopardy_100.json` file.
pub fn load_jeopardy_file(path: impl AsRef<Path>) -> Result<Vec<JeopardyRecord>, DemoError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let records = parse_jeopardy_records(&bytes)?;
    debug!(path = %path.display(), count = records.len(), "Loaded Jeopardy records");
    Ok(records)
}

/// Parse the quickstart dataset.
pub fn parse_tutorial_records(bytes: &[u8]) -> Result<Vec<TutorialRecord>, DemoError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Generate `count` placeholder articles.
///
/// These carry no derived id; the service assigns one per import.
pub fn sample_articles(count: usize) -> Vec<DataObject> {
    (0..count)
        .map(|i| {
            DataObject::new(ARTICLE_CLASS)
                .with_property("title", format!("Title {i}"))
                .with_property("url", format!("https://example.com/article/{i}"))
        })
        .collect()
}
