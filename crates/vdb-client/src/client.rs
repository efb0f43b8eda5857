//! HTTP client for the vector-database REST and GraphQL endpoints.
//!
//! Queries are sent as GraphQL documents; this client does not build them.
//! Transient failures (connection errors, 429, 5xx) are retried with
//! exponential backoff.

use std::time::Duration;

use backoff::{backoff::Backoff, ExponentialBackoffBuilder};
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use vdb_types::{BatchObjectResult, BatchSummary, Class, DataObject, ObjectId, Schema, Settings};

use crate::error::ClientError;

/// Header carrying the OpenAI key for vectorizer and generative modules.
pub const OPENAI_KEY_HEADER: &str = "X-OpenAI-Api-Key";

/// Configuration for [`VectorDbClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST base URL (e.g., "http://localhost:8080/v1")
    pub base_url: String,

    /// Service API key, sent as a bearer token
    pub api_key: Option<SecretString>,

    /// OpenAI key forwarded to the service's modules
    pub openai_api_key: Option<SecretString>,

    /// Request timeout
    pub timeout: Duration,

    /// Attempts per request, including the first
    pub max_retries: u32,

    /// First retry delay; later delays grow exponentially
    pub initial_backoff: Duration,
}

impl ClientConfig {
    /// Create config for an unauthenticated service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            openai_api_key: None,
            timeout: Duration::from_secs(60),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }

    /// Create config from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut config = Self::new(settings.base_url());
        config.api_key = settings.api_key.clone().map(SecretString::from);
        config.openai_api_key = settings.openai_api_key.clone().map(SecretString::from);
        config.timeout = Duration::from_secs(settings.timeout_secs);
        config.max_retries = settings.max_retries;
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_openai_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai_api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }
}

/// Result of [`VectorDbClient::import_objects`].
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub summary: BatchSummary,

    /// Per-object results in input order
    pub results: Vec<BatchObjectResult>,
}

/// Client for a single vector-database service.
pub struct VectorDbClient {
    http: Client,
    config: ClientConfig,
}

impl VectorDbClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.max_retries == 0 {
            return Err(ClientError::Config("max_retries must be > 0".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // ===== GraphQL =====

    /// Run a GraphQL document against `/graphql`.
    ///
    /// Errors reported alongside data are logged and left in the returned
    /// document; errors without data fail the call.
    pub async fn graphql(&self, query: &str) -> Result<Value, ClientError> {
        debug!(query_len = query.len(), "GraphQL request");
        let response: Value = self
            .request_json(Method::POST, "/graphql", Some(&json!({ "query": query })))
            .await?;

        let messages = graphql_error_messages(&response);
        if messages.is_empty() {
            return Ok(response);
        }

        let has_data = response.get("data").map(|d| !d.is_null()).unwrap_or(false);
        if has_data {
            for message in &messages {
                warn!(error = %message, "GraphQL query returned partial errors");
            }
            Ok(response)
        } else {
            Err(ClientError::GraphQl(messages))
        }
    }

    // ===== Schema =====

    pub async fn get_schema(&self) -> Result<Schema, ClientError> {
        self.request_json(Method::GET, "/schema", None::<&Value>)
            .await
    }

    /// Create a class; returns the definition as stored by the service.
    pub async fn create_class(&self, class: &Class) -> Result<Class, ClientError> {
        info!(class = %class.class, "Creating class");
        self.request_json(Method::POST, "/schema", Some(class)).await
    }

    /// Delete a class and all of its objects.
    pub async fn delete_class(&self, class_name: &str) -> Result<(), ClientError> {
        info!(class = %class_name, "Deleting class");
        let path = format!("/schema/{class_name}");
        self.request_empty(Method::DELETE, &path, None::<&Value>)
            .await
    }

    // ===== Objects =====

    /// Send one batch request.
    pub async fn batch_objects(
        &self,
        objects: &[DataObject],
    ) -> Result<Vec<BatchObjectResult>, ClientError> {
        debug!(count = objects.len(), "Batch objects request");
        self.request_json(
            Method::POST,
            "/batch/objects",
            Some(&json!({ "objects": objects })),
        )
        .await
    }

    /// Import objects in batches of `batch_size`.
    ///
    /// Per-object errors are collected in the summary and do not stop the
    /// import; a failed request does.
    pub async fn import_objects(
        &self,
        objects: &[DataObject],
        batch_size: usize,
    ) -> Result<ImportOutcome, ClientError> {
        if batch_size == 0 {
            return Err(ClientError::Config("batch_size must be > 0".to_string()));
        }

        let mut outcome = ImportOutcome::default();
        for (batch_no, chunk) in objects.chunks(batch_size).enumerate() {
            let offset = batch_no * batch_size;
            let mut results = self.batch_objects(chunk).await?;
            if results.len() != chunk.len() {
                warn!(
                    sent = chunk.len(),
                    received = results.len(),
                    "Batch response length differs from request"
                );
                // Keep results aligned with input positions
                results.truncate(chunk.len());
                let received = results.len();
                results.extend(
                    chunk[received..]
                        .iter()
                        .map(BatchObjectResult::unacknowledged),
                );
            }

            for (i, result) in results.iter().enumerate() {
                for message in result.error_messages() {
                    error!(index = offset + i, error = %message, "Object import failed");
                }
            }

            outcome.summary.record(offset, &results);
            outcome.results.extend(results);
        }

        info!(
            imported = outcome.summary.imported,
            failed = outcome.summary.failed.len(),
            "Import finished"
        );
        Ok(outcome)
    }

    /// Create a single object; returns the stored object.
    pub async fn create_object(&self, object: &DataObject) -> Result<Value, ClientError> {
        self.request_json(Method::POST, "/objects", Some(object))
            .await
    }

    pub async fn delete_object(&self, class_name: &str, id: &ObjectId) -> Result<(), ClientError> {
        let path = format!("/objects/{class_name}/{id}");
        self.request_empty(Method::DELETE, &path, None::<&Value>)
            .await
    }

    // ===== Misc =====

    /// Server metadata (`/meta`): hostname, version, enabled modules.
    pub async fn meta(&self) -> Result<Value, ClientError> {
        self.request_json(Method::GET, "/meta", None::<&Value>)
            .await
    }

    /// Download a JSON document from an arbitrary URL.
    ///
    /// Service credentials are not sent.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        info!(url = %url, "Fetching dataset");
        let response = self
            .with_retry(|| self.http.get(url))
            .await?;
        parse_json(response).await
    }

    // ===== Request plumbing =====

    fn service_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }
        if let Some(key) = &self.config.openai_api_key {
            request = request.header(OPENAI_KEY_HEADER, key.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .with_retry(|| self.service_request(method.clone(), path, body))
            .await?;
        parse_json(response).await
    }

    async fn request_empty<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ClientError> {
        self.with_retry(|| self.service_request(method.clone(), path, body))
            .await?;
        Ok(())
    }

    /// Send the request built by `build`, retrying transient failures.
    async fn with_retry<F>(&self, build: F) -> Result<Response, ClientError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(self.config.initial_backoff)
            .with_max_elapsed_time(Some(Duration::from_secs(120)))
            .build();

        let mut attempts = 0;

        loop {
            attempts += 1;

            match send_once(build()).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if !e.is_retryable() {
                        return Err(e);
                    }
                    if attempts >= self.config.max_retries {
                        error!(error = %e, attempts, "Max retries exceeded");
                        return Err(e);
                    }

                    match backoff.next_backoff() {
                        Some(duration) => {
                            warn!(
                                error = %e,
                                retry_in_ms = duration.as_millis(),
                                "Request failed, retrying"
                            );
                            tokio::time::sleep(duration).await;
                        }
                        None => {
                            error!(error = %e, "Backoff exhausted");
                            return Err(e);
                        }
                    }
                }
            }
        }
    }
}

/// Send a request once and map non-success statuses to errors.
async fn send_once(request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::Request(e.to_string()))?;

    let status = response.status();
    if status.as_u16() == 429 {
        return Err(ClientError::RateLimitExceeded);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Http {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

/// Collect `errors[].message` from a GraphQL response.
fn graphql_error_messages(response: &Value) -> Vec<String> {
    response
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}
