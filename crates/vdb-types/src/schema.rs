//! Class (collection) definitions.
//!
//! Field names follow the service's JSON schema (`class`, `dataType`,
//! `moduleConfig`). Fields this crate does not model, such as index
//! configuration returned by `GET /v1/schema`, are kept in `extra` so a
//! fetched schema prints back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Vectorizer module used by the Jeopardy and Question classes.
pub const CONTEXTIONARY: &str = "text2vec-contextionary";

/// Vectorizer module used by the Article class.
pub const TEXT2VEC_OPENAI: &str = "text2vec-openai";

/// Generative module enabling `generate` in `_additional`.
pub const GENERATIVE_OPENAI: &str = "generative-openai";

/// A class property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,

    /// Data type names, e.g. `["text"]` or `["int"]`
    pub data_type: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_config: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: vec![data_type.into()],
            description: None,
            module_config: None,
            extra: Map::new(),
        }
    }

    /// Exclude this property from the given vectorizer module.
    pub fn skip_vectorization(mut self, module: &str) -> Self {
        self.module_config
            .get_or_insert_with(Map::new)
            .insert(module.to_string(), json!({ "skip": true }));
        self
    }
}

/// A class (collection) definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Class name, e.g. `JeopardyQuestion`
    pub class: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectorizer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_config: Option<Map<String, Value>>,

    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Class {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            description: None,
            vectorizer: None,
            module_config: None,
            properties: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_vectorizer(mut self, vectorizer: impl Into<String>) -> Self {
        self.vectorizer = Some(vectorizer.into());
        self
    }

    /// Set the class-level configuration for one module.
    pub fn with_module_config(mut self, module: &str, config: Value) -> Self {
        self.module_config
            .get_or_insert_with(Map::new)
            .insert(module.to_string(), config);
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Full schema as returned by `GET /v1/schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub classes: Vec<Class>,
}

impl Schema {
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.class == name)
    }
}

fn contextionary_class_config() -> Value {
    json!({
        "skip": false,
        "vectorizePropertyName": false,
    })
}

/// `JeopardyQuestion`: the class imported from `jeopardy_100.json`.
///
/// `round` is stored but not vectorized.
pub fn jeopardy_question_class() -> Class {
    Class::new("JeopardyQuestion")
        .with_vectorizer(CONTEXTIONARY)
        .with_module_config(CONTEXTIONARY, contextionary_class_config())
        .with_property(Property::new("round", "text").skip_vectorization(CONTEXTIONARY))
        .with_property(Property::new("value", "int"))
        .with_property(Property::new("question", "text"))
        .with_property(Property::new("answer", "text"))
}

/// `Question`: the quickstart class, with generative search enabled.
///
/// Properties are left to auto-schema on first import.
pub fn question_class() -> Class {
    Class::new("Question")
        .with_vectorizer(CONTEXTIONARY)
        .with_module_config(CONTEXTIONARY, contextionary_class_config())
        .with_module_config(GENERATIVE_OPENAI, json!({}))
}

/// `Article`: vectorized with OpenAI, `url` excluded.
pub fn article_class() -> Class {
    Class::new("Article")
        .with_vectorizer(TEXT2VEC_OPENAI)
        .with_property(Property::new("title", "text"))
        .with_property(Property::new("body", "text"))
        .with_property(Property::new("url", "text").skip_vectorization(TEXT2VEC_OPENAI))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jeopardy_class_json() {
        let value = serde_json::to_value(jeopardy_question_class()).unwrap();
        assert_eq!(value["class"], "JeopardyQuestion");
        assert_eq!(value["vectorizer"], CONTEXTIONARY);
        assert_eq!(value["moduleConfig"][CONTEXTIONARY]["skip"], false);
        assert_eq!(
            value["moduleConfig"][CONTEXTIONARY]["vectorizePropertyName"],
            false
        );

        let props = value["properties"].as_array().unwrap();
        assert_eq!(props.len(), 4);
        assert_eq!(props[0]["name"], "round");
        assert_eq!(props[0]["dataType"], json!(["text"]));
        assert_eq!(props[0]["moduleConfig"][CONTEXTIONARY]["skip"], true);
        assert_eq!(props[1]["dataType"], json!(["int"]));
        assert!(props[2].get("moduleConfig").is_none());
    }

    #[test]
    fn test_question_class_enables_generative() {
        let class = question_class();
        let modules = class.module_config.unwrap();
        assert!(modules.contains_key(GENERATIVE_OPENAI));
        assert!(modules.contains_key(CONTEXTIONARY));
        assert!(class.properties.is_empty());
    }

    #[test]
    fn test_article_url_skipped() {
        let class = article_class();
        let url = class.property("url").unwrap();
        assert_eq!(
            url.module_config.as_ref().unwrap()[TEXT2VEC_OPENAI]["skip"],
            true
        );
        assert!(class.property("title").unwrap().module_config.is_none());
    }

    #[test]
    fn test_schema_keeps_unknown_fields() {
        let raw = json!({
            "classes": [{
                "class": "Article",
                "vectorizer": "none",
                "invertedIndexConfig": { "bm25": { "b": 0.75, "k1": 1.2 } },
                "properties": [{
                    "name": "title",
                    "dataType": ["text"],
                    "tokenization": "word"
                }]
            }]
        });
        let schema: Schema = serde_json::from_value(raw.clone()).unwrap();
        let article = schema.class("Article").unwrap();
        assert!(article.extra.contains_key("invertedIndexConfig"));
        assert_eq!(article.properties[0].extra["tokenization"], "word");
        assert_eq!(serde_json::to_value(&schema).unwrap(), raw);
    }
}
