use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but the completion carried no content.
    #[error("no content in response")]
    NoContent,

    /// The completion text was not the JSON the caller asked for. Never
    /// caught locally; call sites decide what a bad shape means.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AiError>;
