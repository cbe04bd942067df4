//! AiChat Config - Configuration for the AI Help Center client.

mod config;
mod error;

pub use config::*;
pub use error::{ConfigError, ConfigResult};
