//! Normalization of request arguments into JSON payloads.
//!
//! These functions are pure: they never touch the network and never mutate
//! their input. Each normalizer returns a freshly built [`Payload`].

use crate::error::{Error, Result};
use crate::types::{
    AskOptions, DatasetDocumentInput, DatasetUploadOptions, Input, Payload, RetrievedDoc,
};
use serde_json::Value;
use tracing::debug;

/// Shallow-merge `overlay` into `base`. Keys from `overlay` win.
pub fn merge_payload(base: &mut Payload, overlay: &Payload) {
    for (key, value) in overlay {
        base.insert(key.clone(), value.clone());
    }
}

/// Reject a question that is empty or only whitespace.
pub fn require_question(question: &str) -> Result<()> {
    if question.trim().is_empty() {
        return Err(Error::Validation("question must be a non-empty string.".to_string()));
    }
    Ok(())
}

/// Reject an empty dataset upload.
pub fn require_documents<T>(documents: &[T]) -> Result<()> {
    if documents.is_empty() {
        return Err(Error::Validation(
            "At least one document is required when uploading a dataset.".to_string(),
        ));
    }
    Ok(())
}

/// Normalize a document for the `retrieved_docs` list of an ask request.
pub fn normalize_retrieved_doc(doc: &Input<RetrievedDoc>) -> Result<Payload> {
    match doc {
        Input::Structured(doc) => Ok(doc.to_payload()),
        Input::Raw(value) => raw_object(
            value,
            "retrieved_docs must contain mappings or RetrievedDoc instances",
        ),
    }
}

/// Normalize a document for a dataset upload.
pub fn normalize_dataset_document(doc: &Input<DatasetDocumentInput>) -> Result<Payload> {
    match doc {
        Input::Structured(doc) => Ok(doc.to_payload()),
        Input::Raw(value) => raw_object(
            value,
            "documents must contain mappings or DatasetDocumentInput instances",
        ),
    }
}

/// Normalize the options of an ask request.
///
/// Raw mappings are copied; a `retrieved_docs` entry is normalized element
/// by element, and `workspace` / `policies` entries must be objects.
pub fn normalize_ask_options(options: &Input<AskOptions>) -> Result<Payload> {
    let value = match options {
        Input::Structured(options) => return options.to_payload(),
        Input::Raw(value) => value,
    };

    let mut normalized = raw_object(value, "options must be a mapping or AskOptions instance")?;

    if let Some(docs) = normalized.get("retrieved_docs") {
        let Value::Array(docs) = docs else {
            return Err(Error::Type("retrieved_docs must be an iterable".to_string()));
        };
        debug!("Normalizing {} raw retrieved docs", docs.len());
        let docs = docs
            .iter()
            .map(|doc| {
                raw_object(
                    doc,
                    "retrieved_docs must contain mappings or RetrievedDoc instances",
                )
                .map(Value::Object)
            })
            .collect::<Result<Vec<_>>>()?;
        normalized.insert("retrieved_docs".into(), Value::Array(docs));
    }

    for key in ["workspace", "policies"] {
        if normalized.get(key).is_some_and(|value| !value.is_object()) {
            return Err(Error::Type(format!("{} must be a mapping if provided", key)));
        }
    }

    Ok(normalized)
}

/// Normalize the options of a dataset upload. Raw mappings are copied verbatim.
pub fn normalize_dataset_options(options: &Input<DatasetUploadOptions>) -> Result<Payload> {
    match options {
        Input::Structured(options) => Ok(options.to_payload()),
        Input::Raw(value) => raw_object(
            value,
            "options must be a mapping or DatasetUploadOptions instance",
        ),
    }
}

/// Shallow-copy a raw JSON object, rejecting every other JSON type.
fn raw_object(value: &Value, message: &str) -> Result<Payload> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(Error::Type(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_merge_payload_overlay_wins() {
        let mut base = obj(json!({"a": 1, "b": 2}));
        merge_payload(&mut base, &obj(json!({"b": 3, "c": 4})));
        assert_eq!(Value::Object(base), json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_require_question() {
        assert!(require_question("Where is my order?").is_ok());
        for question in ["", "  ", "\n\t"] {
            assert!(matches!(require_question(question), Err(Error::Validation(_))));
        }
    }

    #[test]
    fn test_require_documents() {
        assert!(require_documents(&[json!({"title": "FAQ"})]).is_ok());
        let err = require_documents::<Value>(&[]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("At least one document"));
    }

    #[test]
    fn test_normalize_retrieved_doc() {
        let structured = Input::from(RetrievedDoc::new("1", "T", "https://t", "body"));
        assert_eq!(normalize_retrieved_doc(&structured).unwrap()["title"], "T");

        // Raw mappings are not checked for required keys.
        let raw: Input<RetrievedDoc> = json!({"anything": true}).into();
        assert_eq!(
            Value::Object(normalize_retrieved_doc(&raw).unwrap()),
            json!({"anything": true})
        );

        let bad: Input<RetrievedDoc> = json!(42).into();
        assert!(matches!(normalize_retrieved_doc(&bad), Err(Error::Type(_))));
    }

    #[test]
    fn test_normalize_dataset_document() {
        let bad: Input<DatasetDocumentInput> = json!(["title"]).into();
        let err = normalize_dataset_document(&bad).unwrap_err();
        assert!(err.to_string().contains("DatasetDocumentInput"));
    }

    #[test]
    fn test_normalize_raw_ask_options() {
        let options: Input<AskOptions> = json!({
            "mode": "markdown",
            "workspace": {"name": "Acme"},
            "retrieved_docs": [{"id": "1"}, {"id": "2"}],
            "custom": [1, 2, 3]
        })
        .into();

        let payload = normalize_ask_options(&options).unwrap();
        assert_eq!(payload["retrieved_docs"], json!([{"id": "1"}, {"id": "2"}]));
        assert_eq!(payload["workspace"], json!({"name": "Acme"}));
        assert_eq!(payload["custom"], json!([1, 2, 3]));
    }

    #[test]
    fn test_normalize_raw_ask_options_type_errors() {
        let cases = [
            json!({"retrieved_docs": "doc"}),
            json!({"retrieved_docs": [{"id": "1"}, 7]}),
            json!({"workspace": "Acme"}),
            json!({"policies": ["no-pii"]}),
            json!("markdown"),
        ];

        for case in cases {
            let options: Input<AskOptions> = case.clone().into();
            assert!(
                matches!(normalize_ask_options(&options), Err(Error::Type(_))),
                "expected type error for {}",
                case
            );
        }
    }

    #[test]
    fn test_normalize_structured_ask_options() {
        let options = Input::from(AskOptions::new().with_mode("json"));
        assert_eq!(
            Value::Object(normalize_ask_options(&options).unwrap()),
            json!({"mode": "json"})
        );
    }

    #[test]
    fn test_normalize_dataset_options() {
        let raw: Input<DatasetUploadOptions> = json!({"tag": "v2"}).into();
        // Raw options are copied verbatim; the client fills in the default mode.
        assert_eq!(
            Value::Object(normalize_dataset_options(&raw).unwrap()),
            json!({"tag": "v2"})
        );

        let bad: Input<DatasetUploadOptions> = Value::Null.into();
        assert!(matches!(normalize_dataset_options(&bad), Err(Error::Type(_))));
    }
}
