use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirecrawlError {
    /// The provider rejected a search request.
    #[error("search failed: {0}")]
    SearchFailed(String),

    /// The provider rejected a single-URL scrape.
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, FirecrawlError>;
