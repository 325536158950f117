use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while preparing or running a chat exchange.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Missing credential or unusable alias configuration.
    #[error("Configuration error: {0}")]
    Config(String),
    /// A prompt template is missing or could not be read.
    #[error("{}", describe_read_failure(.path, .source))]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Anything that went wrong talking to the completion API.
    #[error("{0}")]
    Vendor(String),
}

impl From<async_openai::error::OpenAIError> for ChatError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        ChatError::Vendor(err.to_string())
    }
}

fn describe_read_failure(path: &Path, source: &io::Error) -> String {
    match source.kind() {
        io::ErrorKind::NotFound => format!("File not found: {}", path.display()),
        _ => format!("Could not read {}: {source}", path.display()),
    }
}
