//! AiChat Core - Request types and payload normalization for the AI Help Center client.
//!
//! Every request argument can be given either as a structured value
//! ([`RetrievedDoc`], [`AskOptions`], ...) or as a loose JSON mapping.
//! The [`normalize`] module turns both shapes into the flat JSON payloads
//! the service expects.

mod error;
pub mod normalize;
mod types;

pub use error::{Error, Result};
pub use normalize::{
    merge_payload, normalize_ask_options, normalize_dataset_document, normalize_dataset_options,
    normalize_retrieved_doc, require_documents, require_question,
};
pub use types::*;
