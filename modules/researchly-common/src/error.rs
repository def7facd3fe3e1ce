use thiserror::Error;

/// Workspace-level error taxonomy. Provider crates carry their own error
/// enums; this is the aggregation the domain and API layers speak.
#[derive(Error, Debug)]
pub enum ResearchlyError {
    #[error("search failed: {0}")]
    Search(String),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
