use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarlineError {
    #[error("Invalid unit template '{name}': {reason}")]
    InvalidTemplate { name: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WarlineError>;
