//! Request value types for the AI Help Center API.

use crate::error::Result;
use crate::normalize::{merge_payload, normalize_retrieved_doc};
use serde::Deserialize;
use serde_json::Value;

/// A JSON object as sent over the wire.
pub type Payload = serde_json::Map<String, Value>;

/// Default dataset upload mode: add documents to the existing dataset.
pub const MODE_APPEND: &str = "append";

/// Dataset upload mode that discards the existing dataset first.
pub const MODE_REPLACE: &str = "replace";

/// Response formats understood by the ask endpoint.
pub mod response_mode {
    pub const MARKDOWN: &str = "markdown";
    pub const JSON: &str = "json";
}

/// An argument given either as a structured value or as a raw JSON value.
///
/// Raw values must be JSON objects; anything else is rejected with
/// [`Error::Type`](crate::Error::Type) when the argument is normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum Input<T> {
    Structured(T),
    Raw(Value),
}

impl<T> From<Payload> for Input<T> {
    fn from(map: Payload) -> Self {
        Input::Raw(Value::Object(map))
    }
}

impl<T> From<Value> for Input<T> {
    fn from(value: Value) -> Self {
        Input::Raw(value)
    }
}

macro_rules! structured_input {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Input<$ty> {
                fn from(value: $ty) -> Self {
                    Input::Structured(value)
                }
            }
        )*
    };
}

structured_input!(RetrievedDoc, DatasetDocumentInput, AskOptions, DatasetUploadOptions);

/// A document handed to the retrieval pipeline alongside a question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetrievedDoc {
    pub id: String,
    pub title: String,
    pub url: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Additional keys, applied after the fields above.
    #[serde(flatten)]
    pub extras: Payload,
}

impl RetrievedDoc {
    /// Create a new retrieved document.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            text: text.into(),
            created_at: None,
            extras: Payload::new(),
        }
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Add an extra key. Extras override the named fields in the payload.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Build the JSON payload for this document.
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("id".into(), Value::String(self.id.clone()));
        payload.insert("title".into(), Value::String(self.title.clone()));
        payload.insert("url".into(), Value::String(self.url.clone()));
        payload.insert("text".into(), Value::String(self.text.clone()));
        if let Some(created_at) = &self.created_at {
            payload.insert("created_at".into(), Value::String(created_at.clone()));
        }
        merge_payload(&mut payload, &self.extras);
        payload
    }
}

/// A document accepted by the dataset upload endpoint.
///
/// The identifier is optional; the service generates one when it is omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetDocumentInput {
    pub title: String,
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extras: Payload,
}

impl DatasetDocumentInput {
    pub fn new(title: impl Into<String>, text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            url: url.into(),
            id: None,
            created_at: None,
            extras: Payload::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Build the JSON payload for this document.
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("title".into(), Value::String(self.title.clone()));
        payload.insert("text".into(), Value::String(self.text.clone()));
        payload.insert("url".into(), Value::String(self.url.clone()));
        if let Some(id) = &self.id {
            payload.insert("id".into(), Value::String(id.clone()));
        }
        if let Some(created_at) = &self.created_at {
            payload.insert("created_at".into(), Value::String(created_at.clone()));
        }
        merge_payload(&mut payload, &self.extras);
        payload
    }
}

/// Branding and tone information for the workspace a question is asked in.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Workspace {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub extra: Option<Payload>,
}

impl Workspace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra
            .get_or_insert_with(Payload::new)
            .insert(key.into(), value.into());
        self
    }
}

impl From<Workspace> for Payload {
    fn from(workspace: Workspace) -> Self {
        let mut payload = Payload::new();
        payload.insert("name".into(), Value::String(workspace.name));
        for (key, value) in [
            ("brand", workspace.brand),
            ("tone", workspace.tone),
            ("locale", workspace.locale),
        ] {
            if let Some(value) = value {
                payload.insert(key.into(), Value::String(value));
            }
        }
        if let Some(extra) = workspace.extra {
            payload.insert("extra".into(), Value::Object(extra));
        }
        payload
    }
}

/// Optional parameters accompanying an ask request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AskOptions {
    pub workspace: Option<Payload>,
    pub retrieved_docs: Option<Vec<Input<RetrievedDoc>>>,
    pub policies: Option<Payload>,
    pub mode: Option<String>,
    /// Additional keys, applied last. They override every field above.
    pub extras: Payload,
}

impl AskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace(mut self, workspace: impl Into<Payload>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Append a document to the retrieval context.
    pub fn with_retrieved_doc(mut self, doc: impl Into<Input<RetrievedDoc>>) -> Self {
        self.retrieved_docs
            .get_or_insert_with(Vec::new)
            .push(doc.into());
        self
    }

    pub fn with_policies(mut self, policies: Payload) -> Self {
        self.policies = Some(policies);
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Build the JSON payload for these options.
    ///
    /// Fails if a raw retrieved document is not a JSON object.
    pub fn to_payload(&self) -> Result<Payload> {
        let mut payload = Payload::new();
        if let Some(workspace) = &self.workspace {
            payload.insert("workspace".into(), Value::Object(workspace.clone()));
        }
        if let Some(docs) = &self.retrieved_docs {
            let docs = docs
                .iter()
                .map(|doc| normalize_retrieved_doc(doc).map(Value::Object))
                .collect::<Result<Vec<_>>>()?;
            payload.insert("retrieved_docs".into(), Value::Array(docs));
        }
        if let Some(policies) = &self.policies {
            payload.insert("policies".into(), Value::Object(policies.clone()));
        }
        if let Some(mode) = &self.mode {
            payload.insert("mode".into(), Value::String(mode.clone()));
        }
        merge_payload(&mut payload, &self.extras);
        Ok(payload)
    }
}

/// Flags accepted by the dataset upload endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetUploadOptions {
    pub mode: String,
    /// Additional keys, applied last.
    ///
    /// Note that a `documents` key here replaces the uploaded document list.
    pub extras: Payload,
}

impl Default for DatasetUploadOptions {
    fn default() -> Self {
        Self {
            mode: MODE_APPEND.to_string(),
            extras: Payload::new(),
        }
    }
}

impl DatasetUploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that replace the existing dataset.
    pub fn replace() -> Self {
        Self::new().with_mode(MODE_REPLACE)
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("mode".into(), Value::String(self.mode.clone()));
        merge_payload(&mut payload, &self.extras);
        payload
    }
}
