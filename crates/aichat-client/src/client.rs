//! AI Help Center HTTP client.

use crate::endpoint::build_url;
use crate::error::{AiChatError, AiChatResult};
use aichat_config::{ClientConfig, ConfigError, ConfigResult};
use aichat_core::normalize::{
    merge_payload, normalize_ask_options, normalize_dataset_document, normalize_dataset_options,
    require_documents, require_question,
};
use aichat_core::{
    AskOptions, DatasetDocumentInput, DatasetUploadOptions, Input, Payload, MODE_APPEND,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

const ASK_CONTEXT: &str = "Failed to submit ask request";
const DATASET_CONTEXT: &str = "Failed to upload dataset";

/// Client for the AI Help Center ask and dataset APIs.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AiChatClient {
    client: Client,
    owns_session: bool,
    base_url: String,
    ask_path: String,
    dataset_path: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl AiChatClient {
    /// Create a new client with default settings.
    pub fn new(base_url: impl Into<String>) -> AiChatResult<Self> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create a new client from configuration. The client owns its HTTP session.
    pub fn from_config(config: ClientConfig) -> AiChatResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| AiChatError::Transport {
                context: "Failed to initialize HTTP session".to_string(),
                source,
            })?;

        let mut this = Self::with_session(config, client)?;
        this.owns_session = true;
        Ok(this)
    }

    /// Create a new client that sends requests through an existing HTTP session.
    pub fn with_session(config: ClientConfig, client: Client) -> AiChatResult<Self> {
        config.validate()?;
        let base_url = config.normalized_base_url()?;
        let headers = build_headers(&config.default_headers)?;

        debug!("Configured AI Help Center client for {}", base_url);

        Ok(Self {
            client,
            owns_session: false,
            base_url,
            timeout: config.timeout(),
            ask_path: config.ask_path,
            dataset_path: config.dataset_path,
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ask_path(&self) -> &str {
        &self.ask_path
    }

    pub fn dataset_path(&self) -> &str {
        &self.dataset_path
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the HTTP session was created by this client.
    pub fn owns_session(&self) -> bool {
        self.owns_session
    }

    /// Ask a question.
    pub async fn ask(&self, question: &str) -> AiChatResult<Value> {
        let payload = ask_payload(question, None)?;
        self.post_json(&self.ask_path, &payload, ASK_CONTEXT).await
    }

    /// Ask a question with additional options.
    pub async fn ask_with(
        &self,
        question: &str,
        options: impl Into<Input<AskOptions>>,
    ) -> AiChatResult<Value> {
        let options = options.into();
        let payload = ask_payload(question, Some(&options))?;
        self.post_json(&self.ask_path, &payload, ASK_CONTEXT).await
    }

    /// Upload documents, appending them to the existing dataset.
    pub async fn upload_dataset<I>(&self, documents: I) -> AiChatResult<Value>
    where
        I: IntoIterator,
        I::Item: Into<Input<DatasetDocumentInput>>,
    {
        let documents: Vec<Input<DatasetDocumentInput>> =
            documents.into_iter().map(Into::into).collect();
        let payload = dataset_payload(&documents, None)?;
        self.post_json(&self.dataset_path, &payload, DATASET_CONTEXT).await
    }

    /// Upload documents with explicit upload options.
    pub async fn upload_dataset_with<I>(
        &self,
        documents: I,
        options: impl Into<Input<DatasetUploadOptions>>,
    ) -> AiChatResult<Value>
    where
        I: IntoIterator,
        I::Item: Into<Input<DatasetDocumentInput>>,
    {
        let documents: Vec<Input<DatasetDocumentInput>> =
            documents.into_iter().map(Into::into).collect();
        let options = options.into();
        let payload = dataset_payload(&documents, Some(&options))?;
        self.post_json(&self.dataset_path, &payload, DATASET_CONTEXT).await
    }

    /// Release the HTTP session.
    ///
    /// Dropping the client has the same effect; clones keep the shared
    /// connection pool alive until the last one goes away.
    pub fn close(self) {
        if self.owns_session {
            info!("Closing HTTP session for {}", self.base_url);
        }
    }

    async fn post_json(&self, path: &str, body: &Payload, context: &str) -> AiChatResult<Value> {
        let url = build_url(&self.base_url, path);
        let body = serde_json::to_vec(body).map_err(AiChatError::Serialize)?;
        debug!("POST {} ({} bytes)", url, body.len());

        let mut request = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .body(body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|source| {
            warn!("Request to {} failed: {}", url, source);
            AiChatError::Transport {
                context: context.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = match text.trim() {
                "" => status.canonical_reason().unwrap_or_default().to_string(),
                trimmed => trimmed.to_string(),
            };
            warn!("{} responded with status {}", url, status.as_u16());
            return Err(AiChatError::Http {
                context: context.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| AiChatError::Transport {
                context: context.to_string(),
                source,
            })?;
        let value = serde_json::from_slice(&bytes).map_err(AiChatError::InvalidJson)?;

        info!("{} responded with status {}", url, status.as_u16());
        Ok(value)
    }
}

/// Build the ask request body: the question, then the normalized options on top.
fn ask_payload(question: &str, options: Option<&Input<AskOptions>>) -> AiChatResult<Payload> {
    require_question(question)?;

    let mut payload = Payload::new();
    payload.insert("question".into(), Value::String(question.to_string()));
    if let Some(options) = options {
        merge_payload(&mut payload, &normalize_ask_options(options)?);
    }
    Ok(payload)
}

/// Build the dataset upload body.
///
/// Options are merged over `documents`, so an options mapping carrying a
/// `documents` key replaces the uploaded list. `mode` falls back to append.
fn dataset_payload(
    documents: &[Input<DatasetDocumentInput>],
    options: Option<&Input<DatasetUploadOptions>>,
) -> AiChatResult<Payload> {
    require_documents(documents)?;

    let documents = documents
        .iter()
        .map(|doc| normalize_dataset_document(doc).map(Value::Object))
        .collect::<aichat_core::Result<Vec<_>>>()?;

    let mut payload = Payload::new();
    payload.insert("documents".into(), Value::Array(documents));
    if let Some(options) = options {
        let options = normalize_dataset_options(options)?;
        if options.contains_key("documents") {
            warn!("Dataset options override the documents list");
        }
        merge_payload(&mut payload, &options);
    }
    if !payload.contains_key("mode") {
        payload.insert("mode".into(), Value::String(MODE_APPEND.to_string()));
    }
    Ok(payload)
}

/// `Content-Type: application/json` with the configured headers layered on top.
fn build_headers(defaults: &BTreeMap<String, String>) -> ConfigResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in defaults {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ConfigError::Invalid(format!("invalid header name {:?}: {}", name, e))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            ConfigError::Invalid(format!("invalid value for header {:?}: {}", name, e))
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
