use ai_client::OpenAi;
use async_trait::async_trait;

use researchly_common::{ResearchlyError, SearchResult};

/// Web search seam. One provider call per invocation, no retry.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ResearchlyError>;
}

/// Single-URL content extraction seam. Returns the markdown body, empty when
/// the page had none.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<String, ResearchlyError>;
}

/// Chat-completion seam for the LLM activities. Implemented by the live
/// OpenAI client and by scripted stubs in tests.
#[async_trait]
pub trait LlmChat: Send + Sync {
    /// One round trip in JSON-object response mode; returns raw completion text.
    async fn chat_json(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> ai_client::Result<String>;

    /// One round trip in plain-text mode.
    async fn chat_text(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> ai_client::Result<String>;
}

#[async_trait]
impl LlmChat for ai_client::OpenAi {
    async fn chat_json(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> ai_client::Result<String> {
        OpenAi::chat_json(self, system, user, temperature).await
    }

    async fn chat_text(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> ai_client::Result<String> {
        OpenAi::chat_text(self, system, user, temperature).await
    }
}
