use async_trait::async_trait;
use firecrawl_client::FirecrawlClient;

use researchly_common::{ResearchlyError, SearchResult};

use crate::traits::{ContentExtractor, WebSearcher};

/// Firecrawl-backed web search adapter.
pub struct FirecrawlSearcher {
    client: FirecrawlClient,
}

impl FirecrawlSearcher {
    pub fn new(client: FirecrawlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebSearcher for FirecrawlSearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ResearchlyError> {
        let docs = self
            .client
            .search(query)
            .await
            .map_err(|e| ResearchlyError::Search(e.to_string()))?;

        Ok(docs
            .into_iter()
            .map(|d| SearchResult {
                url: d.url.unwrap_or_default(),
                title: d.title.unwrap_or_default(),
                snippet: d.description.unwrap_or_default(),
            })
            .collect())
    }
}

/// Firecrawl-backed single-URL extractor.
pub struct FirecrawlExtractor {
    client: FirecrawlClient,
}

impl FirecrawlExtractor {
    pub fn new(client: FirecrawlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentExtractor for FirecrawlExtractor {
    async fn extract(&self, url: &str) -> Result<String, ResearchlyError> {
        self.client
            .scrape(url)
            .await
            .map_err(|e| ResearchlyError::Extraction(e.to_string()))
    }
}
