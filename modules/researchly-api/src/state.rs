use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use firecrawl_client::FirecrawlClient;
use tracing::warn;

use ai_client::OpenAi;
use researchly_common::{Config, FallbackPolicy};
use researchly_core::{FirecrawlSearcher, LlmChat, WebSearcher};

use crate::error::ApiError;
use crate::rest;
use crate::store::{InMemorySourceStore, SourceStore};

pub struct AppState {
    pub store: Arc<dyn SourceStore>,
    /// Live search provider; `None` means mock-only mode.
    pub searcher: Option<Arc<dyn WebSearcher>>,
    /// Live LLM; `None` means mock-only mode.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub fallback_policy: FallbackPolicy,
}

impl AppState {
    /// Wire up live providers where the config carries their keys.
    pub fn from_config(config: &Config) -> Self {
        let searcher: Option<Arc<dyn WebSearcher>> = config.has_firecrawl().then(|| {
            Arc::new(FirecrawlSearcher::new(FirecrawlClient::with_base_url(
                config.firecrawl_api_key.clone(),
                &config.firecrawl_api_url,
            ))) as Arc<dyn WebSearcher>
        });
        let llm: Option<Arc<dyn LlmChat>> = config.has_openai().then(|| {
            Arc::new(OpenAi::new(
                config.openai_api_key.clone(),
                config.openai_model.clone(),
            )) as Arc<dyn LlmChat>
        });

        Self {
            store: Arc::new(InMemorySourceStore::seeded()),
            searcher,
            llm,
            fallback_policy: config.fallback_policy,
        }
    }

    /// Mock-only state: no live providers, seeded store.
    pub fn mock_only(fallback_policy: FallbackPolicy) -> Self {
        Self {
            store: Arc::new(InMemorySourceStore::seeded()),
            searcher: None,
            llm: None,
            fallback_policy,
        }
    }

    /// Resolve a primary-path failure per the configured policy: serve the
    /// mock stand-in, or surface the error.
    pub fn fall_back<T>(
        &self,
        context: &'static str,
        error: researchly_common::ResearchlyError,
        mock: impl FnOnce() -> T,
    ) -> Result<T, ApiError> {
        match self.fallback_policy {
            FallbackPolicy::MockOnError => {
                warn!(context, error = %error, "primary path failed, serving mock payload");
                Ok(mock())
            }
            FallbackPolicy::FailClosed => Err(error.into()),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(rest::health))
        .route("/api/research/query", post(rest::research_query))
        .route("/api/source/{source_id}/chat", post(rest::source_chat))
        .route("/api/source/{source_id}/mode", post(rest::source_mode))
        .route("/api/source/{source_id}/action", post(rest::source_action))
        .route("/api/source/{source_id}/validate", post(rest::source_validate))
        .route("/api/source/{source_id}/details", get(rest::source_details))
        .route("/api/user/log", post(rest::user_log))
        .route("/api/report/feedback", post(rest::report_feedback))
        .route("/api/docs", get(rest::api_docs))
        .with_state(state)
}
