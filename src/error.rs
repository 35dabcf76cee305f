use crate::definition::DefinitionsError;
use thiserror::Error;

/// Top-level error type for the tiles-context library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("definitions error: {0}")]
    Definitions(#[from] DefinitionsError),

    #[error("container requires a default definitions factory")]
    MissingDefinitions,

    #[error("no such definition: {0}")]
    DefinitionNotFound(String),
}
