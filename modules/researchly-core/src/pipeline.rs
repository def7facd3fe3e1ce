use std::sync::Arc;

use tracing::{info, warn};

use researchly_common::{ContentAnalysis, ExtractionTarget, ResearchReport, ResearchlyError};

use crate::activities::{analyze_content, generate_research_report, generate_search_queries};
use crate::batch::{batch_extract, successes, BatchConfig};
use crate::traits::{ContentExtractor, LlmChat, WebSearcher};

/// Tuning for one research run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Search queries generated per round.
    pub breadth: usize,
    /// Follow-up rounds allowed after the first.
    pub max_depth: usize,
    /// Search hits taken per query.
    pub max_results_per_query: usize,
    pub batch: BatchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            breadth: 3,
            max_depth: 2,
            max_results_per_query: 5,
            batch: BatchConfig::default(),
        }
    }
}

/// Sequential research driver: expand the topic into queries, search, extract
/// in bounded waves, analyze, follow up while the analysis asks for more, then
/// synthesize the report.
///
/// Coverage failures (a search that errors, a URL that will not extract)
/// shrink the round but never abort the run; LLM failures do.
pub struct ResearchPipeline {
    searcher: Arc<dyn WebSearcher>,
    extractor: Arc<dyn ContentExtractor>,
    llm: Arc<dyn LlmChat>,
    config: PipelineConfig,
}

impl ResearchPipeline {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        extractor: Arc<dyn ContentExtractor>,
        llm: Arc<dyn LlmChat>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            searcher,
            extractor,
            llm,
            config,
        }
    }

    pub async fn run(&self, topic: &str) -> Result<ResearchReport, ResearchlyError> {
        let mut queries =
            generate_search_queries(self.llm.as_ref(), topic, self.config.breadth).await?;
        info!(topic, queries = queries.len(), "research run started");

        let mut analyses: Vec<ContentAnalysis> = Vec::new();
        let mut depth = 0;

        loop {
            let targets = self.gather_targets(&queries).await;
            if targets.is_empty() {
                warn!(depth, "no targets to extract, stopping early");
                break;
            }

            let outcomes =
                batch_extract(self.extractor.as_ref(), &targets, &self.config.batch).await;
            let failed = outcomes.iter().filter(|o| !o.is_success()).count();
            let extracted = successes(outcomes);
            info!(
                depth,
                extracted = extracted.len(),
                failed,
                "extraction round settled"
            );

            if extracted.is_empty() {
                warn!(depth, "nothing extracted this round, stopping early");
                break;
            }

            let analysis = analyze_content(
                self.llm.as_ref(),
                topic,
                &extracted,
                depth,
                self.config.max_depth,
            )
            .await?;

            let follow_ups = analysis.follow_up_queries.clone();
            analyses.push(analysis);

            if depth < self.config.max_depth && !follow_ups.is_empty() {
                depth += 1;
                queries = follow_ups;
            } else {
                break;
            }
        }

        let report = generate_research_report(self.llm.as_ref(), topic, &analyses).await?;
        info!(topic, rounds = analyses.len(), "research run completed");

        Ok(ResearchReport {
            original_query: topic.to_string(),
            rounds: analyses.len(),
            report,
        })
    }

    /// Run every query of the round, keeping the top hits of each. A failed
    /// search is logged and skipped.
    async fn gather_targets(&self, queries: &[String]) -> Vec<ExtractionTarget> {
        let mut targets = Vec::new();
        for query in queries {
            match self.searcher.search(query).await {
                Ok(results) => {
                    targets.extend(
                        results
                            .iter()
                            .take(self.config.max_results_per_query)
                            .map(|r| ExtractionTarget::from_search(r, query.clone())),
                    );
                }
                Err(e) => {
                    warn!(query, error = %e, "search failed, skipping query");
                }
            }
        }
        targets
    }
}
