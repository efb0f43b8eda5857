//! Command handler tests against a mock vector-database service.

use std::io::Write;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vdb_cli::{
    find_recipe, handle_import, handle_object, handle_schema, run_query, run_recipe, ClassPreset,
    ImportCommands, ObjectCommands, Printer, SchemaCommands,
};
use vdb_client::{ClientConfig, VectorDbClient};
use vdb_types::{derive_object_id, Settings};

fn client_for(server: &MockServer) -> VectorDbClient {
    let config = ClientConfig::new(format!("{}/v1", server.uri()))
        .with_initial_backoff(Duration::from_millis(5));
    VectorDbClient::new(config).unwrap()
}

fn batch_echo(keys: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(
        keys.iter()
            .map(|k| {
                json!({
                    "class": "JeopardyQuestion",
                    "id": derive_object_id(k).to_string(),
                    "lastUpdateTimeUnix": 1700000000123i64,
                    "result": {}
                })
            })
            .collect(),
    )
}

#[tokio::test]
async fn run_recipe_prints_response() {
    let server = MockServer::start().await;
    let recipe = find_recipe("jeopardy-near-text").unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(body_partial_json(json!({ "query": recipe.query })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "Get": { "JeopardyQuestion": [ { "question": "q", "answer": "a" } ] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    run_recipe(
        &client_for(&server),
        "jeopardy-near-text",
        Printer { compact: true },
        &mut out,
    )
    .await
    .unwrap();

    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed["data"]["Get"]["JeopardyQuestion"][0]["answer"], "a");
}

#[tokio::test]
async fn unknown_recipe_is_an_error() {
    let server = MockServer::start().await;
    let mut out = Vec::new();
    let err = run_recipe(&client_for(&server), "nope", Printer::default(), &mut out)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown recipe"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn run_query_reads_file() {
    let server = MockServer::start().await;
    let document = "{ Get { Article { title } } }";

    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(body_partial_json(json!({ "query": document })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "Get": { "Article": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(document.as_bytes()).unwrap();

    let mut out = Vec::new();
    run_query(
        &client_for(&server),
        file.path().to_str(),
        None,
        Printer::default(),
        &mut out,
    )
    .await
    .unwrap();
    assert!(String::from_utf8(out).unwrap().contains("\"Article\""));
}

#[tokio::test]
async fn schema_create_preset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/schema"))
        .and(body_partial_json(json!({
            "class": "Article",
            "vectorizer": "text2vec-openai"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "class": "Article",
            "vectorizer": "text2vec-openai",
            "properties": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    handle_schema(
        &client_for(&server),
        SchemaCommands::Create {
            preset: ClassPreset::Article,
        },
        Printer::default(),
        &mut out,
    )
    .await
    .unwrap();
    assert!(String::from_utf8(out).unwrap().contains("text2vec-openai"));
}

#[tokio::test]
async fn import_jeopardy_prints_per_object_lines() {
    let server = MockServer::start().await;

    let mut dataset = tempfile::NamedTempFile::new().unwrap();
    write!(
        dataset,
        r#"[
            {{"round": "Jeopardy!", "value": 100, "question": "First Question", "answer": "One"}},
            {{"round": "Jeopardy!", "value": 200, "question": "Second Question", "answer": "Two"}}
        ]"#
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/batch/objects"))
        .and(body_partial_json(json!({
            "objects": [
                {
                    "class": "JeopardyQuestion",
                    "id": derive_object_id("first question").to_string(),
                    "properties": { "value": 100 }
                },
                { "id": derive_object_id("second question").to_string() }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(batch_echo(&["First Question", "Second Question"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    handle_import(
        &client_for(&server),
        &Settings::default(),
        ImportCommands::Jeopardy {
            file: dataset.path().to_string_lossy().to_string(),
            batch_size: None,
        },
        &mut out,
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        format!(
            "index 0: {} lastUpdateTimeUnix: 1700000000123",
            derive_object_id("First Question")
        )
    );
    assert!(lines[1].starts_with("index 1: "));
}

#[tokio::test]
async fn import_reports_object_errors_and_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/batch/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "class": "Article", "result": {} },
            {
                "class": "Article",
                "result": { "errors": { "error": [ { "message": "class Article not found" } ] } }
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = handle_import(
        &client_for(&server),
        &Settings::default(),
        ImportCommands::Articles { count: 2 },
        &mut out,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("1 of 2 objects failed"));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("index 0: - lastUpdateTimeUnix: 0"));
    assert!(text.contains("error at index 1: class Article not found"));
}

#[tokio::test]
async fn import_short_batch_response_fails() {
    let server = MockServer::start().await;

    let mut dataset = tempfile::NamedTempFile::new().unwrap();
    write!(
        dataset,
        r#"[
            {{"round": "Jeopardy!", "value": 100, "question": "First Question", "answer": "One"}},
            {{"round": "Jeopardy!", "value": 200, "question": "Second Question", "answer": "Two"}}
        ]"#
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/batch/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch_echo(&["First Question"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = handle_import(
        &client_for(&server),
        &Settings::default(),
        ImportCommands::Jeopardy {
            file: dataset.path().to_string_lossy().to_string(),
            batch_size: None,
        },
        &mut out,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("1 of 2 objects failed"));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(&format!(
        "index 1: {} lastUpdateTimeUnix: 0",
        derive_object_id("Second Question")
    )));
    assert!(text.contains("error at index 1: no result returned"));
}

#[tokio::test]
async fn import_tutorial_from_local_file() {
    let server = MockServer::start().await;

    let mut dataset = tempfile::NamedTempFile::new().unwrap();
    write!(
        dataset,
        r#"[{{"Category":"SCIENCE","Question":"This organ removes excess glucose","Answer":"Liver"}}]"#
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/batch/objects"))
        .and(body_partial_json(json!({
            "objects": [ {
                "class": "Question",
                "id": derive_object_id("This organ removes excess glucose").to_string(),
                "properties": { "category": "SCIENCE" }
            } ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(batch_echo(&["This organ removes excess glucose"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    handle_import(
        &client_for(&server),
        &Settings::default(),
        ImportCommands::Tutorial {
            url: "http://127.0.0.1:9/unused.json".to_string(),
            file: Some(dataset.path().to_string_lossy().to_string()),
            batch_size: Some(10),
        },
        &mut out,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn object_create_with_derived_id() {
    let server = MockServer::start().await;
    let id = derive_object_id("dummy");

    Mock::given(method("POST"))
        .and(path("/v1/objects"))
        .and(body_partial_json(json!({
            "class": "TestClass",
            "id": id.to_string(),
            "properties": { "name": "dummy", "count": 3 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "class": "TestClass",
            "id": id.to_string(),
            "properties": { "name": "dummy", "count": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    handle_object(
        &client_for(&server),
        ObjectCommands::Create {
            class: "TestClass".to_string(),
            props: vec!["name=dummy".to_string(), "count=3".to_string()],
            derive_id: Some("DUMMY".to_string()),
            id: None,
        },
        Printer::default(),
        &mut out,
    )
    .await
    .unwrap();
    assert!(String::from_utf8(out).unwrap().contains(&id.to_string()));
}

#[tokio::test]
async fn object_delete_rejects_malformed_id() {
    let server = MockServer::start().await;
    let mut out = Vec::new();
    let result = handle_object(
        &client_for(&server),
        ObjectCommands::Delete {
            class: "TestClass".to_string(),
            id: "not-a-uuid".to_string(),
        },
        Printer::default(),
        &mut out,
    )
    .await;
    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}
