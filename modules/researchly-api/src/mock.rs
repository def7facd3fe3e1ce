//! Static stand-in payloads. These are what the server returns when no live
//! provider is configured, and what fallback serves when one fails under the
//! mock-on-error policy.

use researchly_common::{ChatMode, FeedbackItem, SourceRecord};

pub fn mock_sources() -> Vec<SourceRecord> {
    vec![
        SourceRecord {
            id: "1".to_string(),
            title: "Machine Learning in Healthcare".to_string(),
            content: "Research on ML applications...".to_string(),
        },
        SourceRecord {
            id: "2".to_string(),
            title: "AI Ethics".to_string(),
            content: "Ethical considerations in AI...".to_string(),
        },
    ]
}

pub fn mock_chat_response(message: &str, mode: ChatMode) -> String {
    format!("AI response to: \"{message}\" in {} mode", mode.as_str())
}

pub fn mock_validation_report() -> serde_json::Value {
    serde_json::json!({
        "confidence": 0.85,
        "flaggedInconsistencies": [],
        "notes": "Response is consistent with the source material."
    })
}

pub fn mock_feedback() -> Vec<FeedbackItem> {
    vec![
        FeedbackItem {
            section: "general".to_string(),
            issue_type: "clarity".to_string(),
            suggestion: "Tighten the summary paragraph and lead with the main finding."
                .to_string(),
            confidence: 0.7,
        },
        FeedbackItem {
            section: "methodology".to_string(),
            issue_type: "evidence".to_string(),
            suggestion: "Cite the primary study behind the second key finding.".to_string(),
            confidence: 0.6,
        },
    ]
}

pub fn mock_source_metadata(source: &SourceRecord) -> serde_json::Value {
    serde_json::json!({
        "title": source.title,
        "abstract": source.content,
        "authors": [],
        "pdfLink": null,
        "figures": [],
        "pseudocodeBlocks": [],
    })
}
