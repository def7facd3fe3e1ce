// Test doubles for the three trait boundaries:
// - RecordingExtractor (ContentExtractor): concurrency bookkeeping + scripted failures
// - StubSearcher (WebSearcher): query-to-results map with a default
// - ScriptedLlm (LlmChat): queued completions, captured prompts

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use ai_client::AiError;
use async_trait::async_trait;

use researchly_common::{ResearchlyError, SearchResult};

use crate::traits::{ContentExtractor, LlmChat, WebSearcher};

/// A `ContentExtractor` that records call interleaving so tests can assert
/// wave semantics. Each call sleeps briefly to force overlap within a wave.
#[derive(Default)]
pub struct RecordingExtractor {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    events: Mutex<Vec<(String, &'static str)>>,
    fail_all: bool,
    fail_urls: HashSet<String>,
}

impl RecordingExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_all(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn failing_url(mut self, url: impl Into<String>) -> Self {
        self.fail_urls.insert(url.into());
        self
    }

    /// Highest number of concurrently running extractions observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Start/end events in observation order.
    pub fn events(&self) -> Vec<(String, &'static str)> {
        self.events.lock().unwrap().clone()
    }

    /// URLs extracted, in start order.
    pub fn calls(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(_, kind)| *kind == "start")
            .map(|(url, _)| url)
            .collect()
    }
}

#[async_trait]
impl ContentExtractor for RecordingExtractor {
    async fn extract(&self, url: &str) -> Result<String, ResearchlyError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        self.events
            .lock()
            .unwrap()
            .push((url.to_string(), "start"));

        tokio::time::sleep(Duration::from_millis(5)).await;

        self.events.lock().unwrap().push((url.to_string(), "end"));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_all || self.fail_urls.contains(url) {
            Err(ResearchlyError::Extraction(format!("stubbed failure for {url}")))
        } else {
            Ok(format!("# Content of {url}"))
        }
    }
}

/// A `WebSearcher` serving canned results per query.
#[derive(Default)]
pub struct StubSearcher {
    by_query: HashMap<String, Vec<SearchResult>>,
    default_results: Vec<SearchResult>,
    queries: Mutex<Vec<String>>,
}

impl StubSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.by_query.insert(query.into(), results);
        self
    }

    pub fn with_default(mut self, results: Vec<SearchResult>) -> Self {
        self.default_results = results;
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for StubSearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ResearchlyError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self
            .by_query
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_results.clone()))
    }
}

/// Convenience: a search hit pointing at `url`.
pub fn hit(url: &str, title: &str) -> SearchResult {
    SearchResult {
        url: url.to_string(),
        title: title.to_string(),
        snippet: format!("snippet for {title}"),
    }
}

/// An `LlmChat` that replays queued completions and captures every prompt.
#[derive(Default)]
pub struct ScriptedLlm {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<CapturedPrompt>>,
}

#[derive(Debug, Clone)]
pub struct CapturedPrompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub json_mode: bool,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(response.into());
        self
    }

    pub fn prompts(&self) -> Vec<CapturedPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(&self, system: &str, user: &str, temperature: f32, json_mode: bool) -> ai_client::Result<String> {
        self.prompts.lock().unwrap().push(CapturedPrompt {
            system: system.to_string(),
            user: user.to_string(),
            temperature,
            json_mode,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(AiError::NoContent)
    }
}

#[async_trait]
impl LlmChat for ScriptedLlm {
    async fn chat_json(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> ai_client::Result<String> {
        self.next(system, user, temperature, true)
    }

    async fn chat_text(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> ai_client::Result<String> {
        self.next(system, user, temperature, false)
    }
}
