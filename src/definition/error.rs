use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DefinitionsError {
    #[error("required definitions file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read definitions file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse definitions file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid attribute '{attribute}' in definition '{definition}': {reason}")]
    InvalidAttribute {
        definition: String,
        attribute: String,
        reason: String,
    },

    #[error("definition '{definition}' extends unknown definition '{parent}'")]
    ParentNotFound { definition: String, parent: String },

    #[error("circular definition inheritance: {chain}")]
    CircularInheritance { chain: String },

    #[error("invalid locale: {0}")]
    InvalidLocale(String),
}
