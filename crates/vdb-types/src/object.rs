//! Data objects and batch import results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::object_id::ObjectId;

/// A data object as sent to `POST /v1/objects` or `POST /v1/batch/objects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataObject {
    pub class: String,

    /// Primary key. When absent the service assigns a random one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl DataObject {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            id: None,
            properties: Map::new(),
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }

    /// Key the object by the identifier derived from `natural_key`.
    pub fn with_derived_id(self, natural_key: &str) -> Self {
        self.with_id(ObjectId::derive(natural_key))
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// One error entry reported for a batched object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorList {
    #[serde(default)]
    pub error: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorList>,
}

/// Per-object entry of a `POST /v1/batch/objects` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchObjectResult {
    #[serde(default)]
    pub id: Option<ObjectId>,

    #[serde(default)]
    pub class: Option<String>,

    #[serde(default)]
    pub last_update_time_unix: Option<i64>,

    #[serde(default)]
    pub result: ObjectResult,
}

/// Error recorded for an object the service did not report on.
pub const NO_RESULT_MESSAGE: &str = "no result returned";

impl BatchObjectResult {
    /// Result standing in for an object missing from a batch response.
    pub fn unacknowledged(object: &DataObject) -> Self {
        Self {
            id: object.id,
            class: Some(object.class.clone()),
            last_update_time_unix: None,
            result: ObjectResult {
                errors: Some(ErrorList {
                    error: vec![ErrorEntry {
                        message: NO_RESULT_MESSAGE.to_string(),
                    }],
                }),
            },
        }
    }

    /// Error messages reported for this object, empty on success.
    pub fn error_messages(&self) -> Vec<&str> {
        self.result
            .errors
            .as_ref()
            .map(|list| list.error.iter().map(|e| e.message.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        self.error_messages().is_empty()
    }
}

/// A failed object within an import, by position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedObject {
    pub index: usize,
    pub id: Option<ObjectId>,
    pub message: String,
}

/// Outcome of importing a sequence of objects in batches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Objects the service accepted
    pub imported: usize,
    pub failed: Vec<FailedObject>,
}

impl BatchSummary {
    /// Fold one batch response into the summary.
    ///
    /// `offset` is the position of the batch's first object in the whole
    /// import, so failures are reported against the caller's indices.
    pub fn record(&mut self, offset: usize, results: &[BatchObjectResult]) {
        for (i, result) in results.iter().enumerate() {
            let messages = result.error_messages();
            if messages.is_empty() {
                self.imported += 1;
                continue;
            }
            for message in messages {
                self.failed.push(FailedObject {
                    index: offset + i,
                    id: result.id,
                    message: message.to_string(),
                });
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Number of distinct objects with at least one error.
    pub fn failed_objects(&self) -> usize {
        let mut indices: Vec<usize> = self.failed.iter().map(|f| f.index).collect();
        indices.dedup();
        indices.len()
    }
}
