pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::SearchDoc;

use types::{ScrapeRequest, ScrapeResponse, SearchRequest, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/v1";

pub struct FirecrawlClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirecrawlClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Search the web. One outbound call, no retry.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchDoc>> {
        tracing::debug!(query, "Firecrawl search");

        let request = SearchRequest {
            query: query.to_string(),
        };

        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let resp: SearchResponse = resp.json().await?;
        if !resp.success {
            return Err(FirecrawlError::SearchFailed(
                resp.error.unwrap_or_else(|| "Search failed".to_string()),
            ));
        }

        let docs = resp.data.unwrap_or_default();
        tracing::info!(query, count = docs.len(), "Firecrawl search completed");
        Ok(docs)
    }

    /// Scrape one URL as markdown. Returns an empty string when the provider
    /// reports success with no body.
    pub async fn scrape(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Firecrawl scrape");

        let request = ScrapeRequest {
            url: url.to_string(),
            formats: vec!["markdown".to_string()],
        };

        let resp = self
            .client
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let resp: ScrapeResponse = resp.json().await?;
        if !resp.success {
            return Err(FirecrawlError::ExtractionFailed(
                resp.error.unwrap_or_else(|| "Scrape failed".to_string()),
            ));
        }

        Ok(resp
            .data
            .and_then(|d| d.markdown)
            .unwrap_or_default())
    }
}
