use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use researchly_common::{Config, ExtractedContent, ExtractionOutcome, ExtractionTarget};

use crate::traits::ContentExtractor;

/// Tuning for a batch extraction run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Upper bound on in-flight extractions within one wave.
    pub concurrency_limit: usize,
    /// Pause between waves. Zero disables the pause.
    pub batch_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 2,
            batch_delay_ms: 0,
        }
    }
}

impl BatchConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            concurrency_limit: config.firecrawl_concurrency_limit,
            batch_delay_ms: config.firecrawl_batch_delay_ms,
        }
    }
}

/// Extract a list of targets in bounded waves.
///
/// Targets are processed in consecutive chunks of `concurrency_limit`; within
/// a chunk every extraction runs concurrently and the whole chunk settles
/// before the next one starts. Every target yields exactly one outcome, in
/// input order; failures are captured per target, never propagated.
pub async fn batch_extract(
    extractor: &dyn ContentExtractor,
    targets: &[ExtractionTarget],
    config: &BatchConfig,
) -> Vec<ExtractionOutcome> {
    let limit = config.concurrency_limit.max(1);
    let mut outcomes = Vec::with_capacity(targets.len());

    let waves = targets.len().div_ceil(limit);
    debug!(targets = targets.len(), limit, waves, "starting batch extraction");

    for (index, chunk) in targets.chunks(limit).enumerate() {
        let wave = join_all(chunk.iter().map(|target| async move {
            let result = extractor
                .extract(&target.url)
                .await
                .map_err(|e| e.to_string());
            ExtractionOutcome {
                target: target.clone(),
                result,
            }
        }))
        .await;

        for outcome in &wave {
            if let Err(reason) = &outcome.result {
                warn!(url = %outcome.target.url, reason, "extraction failed");
            }
        }
        outcomes.extend(wave);

        let more_to_come = index + 1 < waves;
        if config.batch_delay_ms > 0 && more_to_come {
            tokio::time::sleep(Duration::from_millis(config.batch_delay_ms)).await;
        }
    }

    outcomes
}

/// The best-effort view of a batch: successful extractions only, in the
/// order their targets were submitted.
pub fn successes(outcomes: impl IntoIterator<Item = ExtractionOutcome>) -> Vec<ExtractedContent> {
    outcomes
        .into_iter()
        .filter_map(ExtractionOutcome::into_content)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingExtractor;

    fn targets(n: usize) -> Vec<ExtractionTarget> {
        (0..n)
            .map(|i| ExtractionTarget {
                url: format!("https://example.com/{i}"),
                title: format!("Page {i}"),
                query: "test query".to_string(),
            })
            .collect()
    }

    fn config(limit: usize) -> BatchConfig {
        BatchConfig {
            concurrency_limit: limit,
            batch_delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn respects_concurrency_limit() {
        let extractor = RecordingExtractor::new();
        let input = targets(7);

        batch_extract(&extractor, &input, &config(3)).await;

        assert!(extractor.max_in_flight() <= 3);
        assert_eq!(extractor.calls().len(), 7);
    }

    #[tokio::test]
    async fn runs_in_sequential_waves() {
        let extractor = RecordingExtractor::new();
        let input = targets(6);

        batch_extract(&extractor, &input, &config(2)).await;

        // Every call in wave k must start after every call in wave k-1 ended.
        let events = extractor.events();
        for wave in 0..3 {
            let wave_urls: Vec<String> =
                (wave * 2..wave * 2 + 2).map(|i| format!("https://example.com/{i}")).collect();
            let latest_end = events
                .iter()
                .enumerate()
                .filter(|(_, (url, kind))| wave_urls.contains(url) && *kind == "end")
                .map(|(pos, _)| pos)
                .max()
                .unwrap();
            for (pos, (url, kind)) in events.iter().enumerate() {
                let in_later_wave = !wave_urls.contains(url)
                    && input.iter().position(|t| &t.url == url).unwrap() >= (wave + 1) * 2;
                if in_later_wave && *kind == "start" {
                    assert!(pos > latest_end, "{url} started before wave {wave} settled");
                }
            }
        }
    }

    #[tokio::test]
    async fn all_failures_yield_empty_successes_without_propagating() {
        let extractor = RecordingExtractor::new().failing_all();
        let input = targets(5);

        let outcomes = batch_extract(&extractor, &input, &config(2)).await;

        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|o| !o.is_success()));
        assert!(successes(outcomes).is_empty());
    }

    #[tokio::test]
    async fn partial_failures_keep_exactly_the_successes() {
        let extractor = RecordingExtractor::new()
            .failing_url("https://example.com/1")
            .failing_url("https://example.com/3");
        let input = targets(5);

        let outcomes = batch_extract(&extractor, &input, &config(2)).await;
        assert_eq!(outcomes.len(), 5);

        let extracted = successes(outcomes);
        assert_eq!(extracted.len(), 3);
        for content in &extracted {
            let target = input.iter().find(|t| t.url == content.url).unwrap();
            assert_eq!(content.title, target.title);
            assert_eq!(content.query, target.query);
            assert!(!content.content.is_empty());
        }
    }

    #[tokio::test]
    async fn outcomes_preserve_input_order() {
        let extractor = RecordingExtractor::new();
        let input = targets(5);

        let outcomes = batch_extract(&extractor, &input, &config(4)).await;

        let urls: Vec<&str> = outcomes.iter().map(|o| o.target.url.as_str()).collect();
        let expected: Vec<&str> = input.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, expected);
    }

    #[tokio::test]
    async fn zero_limit_is_clamped_to_one() {
        let extractor = RecordingExtractor::new();
        let input = targets(3);

        batch_extract(&extractor, &input, &config(0)).await;

        assert_eq!(extractor.max_in_flight(), 1);
    }

    #[test]
    fn default_concurrency_limit_is_two() {
        assert_eq!(BatchConfig::default().concurrency_limit, 2);
    }
}
