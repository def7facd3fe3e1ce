//! End-to-end pipeline runs against stubbed providers: scripted LLM
//! completions, canned search hits, recording extractor.

use std::sync::Arc;

use researchly_core::testing::{hit, RecordingExtractor, ScriptedLlm, StubSearcher};
use researchly_core::{BatchConfig, PipelineConfig, ResearchPipeline};

fn config() -> PipelineConfig {
    PipelineConfig {
        breadth: 2,
        max_depth: 2,
        max_results_per_query: 5,
        batch: BatchConfig {
            concurrency_limit: 2,
            batch_delay_ms: 0,
        },
    }
}

#[tokio::test]
async fn follows_up_until_analysis_stops_asking() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .with_response(r#"{"queries":["q1","q2"]}"#)
            .with_response(
                r#"{"summary":"round 0","keyFindings":["f0"],"sources":["https://a"],"followUpQueries":["q3"]}"#,
            )
            .with_response(r#"{"summary":"round 1","keyFindings":["f1"],"sources":["https://c"]}"#)
            .with_response(r#"{"title":"Final Report"}"#),
    );
    let searcher = Arc::new(
        StubSearcher::new()
            .with_results("q1", vec![hit("https://a", "A")])
            .with_results("q2", vec![hit("https://b", "B")])
            .with_results("q3", vec![hit("https://c", "C")]),
    );
    let extractor = Arc::new(RecordingExtractor::new());

    let pipeline = ResearchPipeline::new(searcher.clone(), extractor.clone(), llm.clone(), config());
    let report = pipeline.run("ml in healthcare").await.unwrap();

    assert_eq!(report.original_query, "ml in healthcare");
    assert_eq!(report.rounds, 2);
    assert_eq!(report.report["title"], "Final Report");

    // Both initial queries ran, then the follow-up.
    assert_eq!(searcher.queries(), vec!["q1", "q2", "q3"]);
    assert_eq!(extractor.calls().len(), 3);

    // Report synthesis saw both analysis rounds.
    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 4);
    assert!(prompts[3].user.contains("round 0"));
    assert!(prompts[3].user.contains("round 1"));
}

#[tokio::test]
async fn all_extractions_failing_still_yields_a_report() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .with_response(r#"{"queries":["q1"]}"#)
            .with_response(r#"{"note":"nothing to report"}"#),
    );
    let searcher = Arc::new(StubSearcher::new().with_default(vec![hit("https://a", "A")]));
    let extractor = Arc::new(RecordingExtractor::new().failing_all());

    let pipeline = ResearchPipeline::new(searcher, extractor, llm, config());
    let report = pipeline.run("topic").await.unwrap();

    assert_eq!(report.rounds, 0);
    assert_eq!(report.report["note"], "nothing to report");
}

#[tokio::test]
async fn empty_search_round_stops_early() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .with_response(r#"{"queries":["q1"]}"#)
            .with_response("{}"),
    );
    let searcher = Arc::new(StubSearcher::new());
    let extractor = Arc::new(RecordingExtractor::new());

    let pipeline = ResearchPipeline::new(searcher, extractor.clone(), llm, config());
    let report = pipeline.run("topic").await.unwrap();

    assert_eq!(report.rounds, 0);
    assert!(extractor.calls().is_empty());
}

#[tokio::test]
async fn depth_limit_ignores_follow_up_queries() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .with_response(r#"{"queries":["q1"]}"#)
            .with_response(r#"{"summary":"only round","followUpQueries":["more","and more"]}"#)
            .with_response(r#"{"done":true}"#),
    );
    let searcher = Arc::new(StubSearcher::new().with_default(vec![hit("https://a", "A")]));
    let extractor = Arc::new(RecordingExtractor::new());

    let pipeline = ResearchPipeline::new(
        searcher.clone(),
        extractor,
        llm,
        PipelineConfig {
            max_depth: 0,
            ..config()
        },
    );
    let report = pipeline.run("topic").await.unwrap();

    assert_eq!(report.rounds, 1);
    // The follow-ups never turned into searches.
    assert_eq!(searcher.queries(), vec!["q1"]);
}
