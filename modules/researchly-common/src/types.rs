use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One web search hit. Missing provider fields map to empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// Input descriptor for one scrape request: the URL plus the search context
/// it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionTarget {
    pub url: String,
    pub title: String,
    pub query: String,
}

impl ExtractionTarget {
    pub fn from_search(result: &SearchResult, query: impl Into<String>) -> Self {
        Self {
            url: result.url.clone(),
            title: result.title.clone(),
            query: query.into(),
        }
    }
}

/// A successfully scraped target with its markdown body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub url: String,
    pub title: String,
    pub query: String,
    pub content: String,
}

/// Per-target result of a batch extraction run. Every target gets exactly
/// one outcome; failures carry the reason instead of being dropped.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub target: ExtractionTarget,
    pub result: Result<String, String>,
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Collapse into the best-effort `ExtractedContent` view, `None` on failure.
    pub fn into_content(self) -> Option<ExtractedContent> {
        match self.result {
            Ok(content) => Some(ExtractedContent {
                url: self.target.url,
                title: self.target.title,
                query: self.target.query,
                content,
            }),
            Err(_) => None,
        }
    }
}

/// Parsed output of query expansion. An absent `queries` key decodes as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct QueryExpansion {
    #[serde(default)]
    pub queries: Vec<String>,
}

/// Parsed output of one content-analysis round. Field names follow the
/// provider contract (camelCase on the wire).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_findings: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub follow_up_queries: Vec<String>,
}

/// Final research report: the synthesized body kept verbatim, plus the run
/// context it answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchReport {
    pub original_query: String,
    /// Number of analysis rounds that fed the synthesis.
    pub rounds: usize,
    pub report: serde_json::Value,
}

/// One reviewer remark on a report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub issue_type: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub confidence: f64,
}

/// Parsed output of report review.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ReportFeedback {
    #[serde(default)]
    pub feedback: Vec<FeedbackItem>,
}

/// Review focus toggles for report feedback.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReportFlags {
    #[serde(default)]
    pub replicability: bool,
    #[serde(default)]
    pub evidence_check: bool,
}

/// Interaction mode for source chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Summary,
    Explanation,
    Implementation,
}

impl ChatMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "summary" => Some(ChatMode::Summary),
            "explanation" => Some(ChatMode::Explanation),
            "implementation" => Some(ChatMode::Implementation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Summary => "summary",
            ChatMode::Explanation => "explanation",
            ChatMode::Implementation => "implementation",
        }
    }
}

/// A source row as served by the API. The demo store holds a fixed set of
/// these; a real deployment would back the same shape with a database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_expansion_tolerates_missing_key() {
        let parsed: QueryExpansion = serde_json::from_str("{}").unwrap();
        assert!(parsed.queries.is_empty());
    }

    #[test]
    fn content_analysis_uses_camel_case_wire_names() {
        let parsed: ContentAnalysis = serde_json::from_str(
            r#"{"summary":"s","keyFindings":["a"],"sources":["u"],"followUpQueries":["q"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.key_findings, vec!["a"]);
        assert_eq!(parsed.follow_up_queries, vec!["q"]);
    }

    #[test]
    fn outcome_collapses_to_content_on_success_only() {
        let target = ExtractionTarget {
            url: "https://example.com".into(),
            title: "Example".into(),
            query: "q".into(),
        };
        let ok = ExtractionOutcome {
            target: target.clone(),
            result: Ok("# body".into()),
        };
        let err = ExtractionOutcome {
            target,
            result: Err("timeout".into()),
        };
        assert_eq!(ok.into_content().unwrap().content, "# body");
        assert!(err.into_content().is_none());
    }

    #[test]
    fn chat_mode_round_trips_known_values() {
        assert_eq!(ChatMode::parse("summary"), Some(ChatMode::Summary));
        assert_eq!(ChatMode::parse("implementation"), Some(ChatMode::Implementation));
        assert_eq!(ChatMode::parse("other"), None);
    }
}
