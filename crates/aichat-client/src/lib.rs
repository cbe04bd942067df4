//! AiChat Client - HTTP client for the AI Help Center service.
//!
//! ```no_run
//! use aichat_client::{AiChatClient, AskOptions, DatasetDocumentInput, DatasetUploadOptions};
//!
//! # async fn run() -> aichat_client::AiChatResult<()> {
//! let client = AiChatClient::new("https://help.example.com")?;
//!
//! let answer = client
//!     .ask_with("What is the refund policy?", AskOptions::new().with_mode("markdown"))
//!     .await?;
//! println!("{}", answer["answer"]);
//!
//! let docs = vec![DatasetDocumentInput::new(
//!     "FAQ",
//!     "Frequently asked questions",
//!     "https://example.com/faq",
//! )];
//! client.upload_dataset_with(docs, DatasetUploadOptions::replace()).await?;
//!
//! client.close();
//! # Ok(())
//! # }
//! ```

mod client;
mod endpoint;
mod error;

pub use aichat_config::{ClientConfig, ConfigError};
pub use aichat_core::{
    normalize, response_mode, AskOptions, DatasetDocumentInput, DatasetUploadOptions, Input,
    Payload, RetrievedDoc, Workspace, MODE_APPEND, MODE_REPLACE,
};
pub use client::AiChatClient;
pub use endpoint::build_url;
pub use error::{AiChatError, AiChatResult};
