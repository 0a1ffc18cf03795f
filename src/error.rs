use thiserror::Error;

/// Errors raised by the surfaces around the tree-state engine: file access,
/// clipboard, configuration and node actions.
///
/// Malformed JSON input is not one of them; it is a [`crate::ParseError`] and
/// moves the session into its error phase instead of failing the call.
#[derive(Debug, Error)]
pub enum PryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no document loaded")]
    NoDocument,
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
