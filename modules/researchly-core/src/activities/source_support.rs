use ai_client::truncate_to_char_boundary;
use researchly_common::{
    ChatMode, FeedbackItem, ReportFeedback, ReportFlags, ResearchlyError, SourceRecord,
};

use super::llm_error;
use crate::traits::LlmChat;

/// Cap on report text fed into one feedback prompt.
const MAX_REPORT_BYTES: usize = 10_000;

/// Answer a user message grounded in one source, phrased per the requested
/// interaction mode. Plain-text completion.
pub async fn source_chat_response(
    llm: &dyn LlmChat,
    source: &SourceRecord,
    message: &str,
    mode: ChatMode,
) -> Result<String, ResearchlyError> {
    let content = format!("Title: {}\n\n{}", source.title, source.content);
    let prompt = match mode {
        ChatMode::Summary => format!(
            "Based on this research source, provide a point-form summary addressing: {message}\n\nSource Content:\n{content}"
        ),
        ChatMode::Explanation => format!(
            "Explain the concepts in this research source as they relate to: {message}\n\nSource Content:\n{content}"
        ),
        ChatMode::Implementation => format!(
            "Provide step-by-step implementation guidance based on this research source for: {message}\n\nSource Content:\n{content}"
        ),
    };

    llm.chat_text(
        "You are a helpful research assistant that provides accurate information based on the given research source. Be concise but informative.",
        &prompt,
        0.7,
    )
    .await
    .map_err(llm_error)
}

/// Check an AI response for accuracy against its constraints. The validation
/// report is returned verbatim as structured JSON.
pub async fn validate_response(
    llm: &dyn LlmChat,
    ai_response: &str,
    constraints: &serde_json::Value,
) -> Result<serde_json::Value, ResearchlyError> {
    let user = format!(
        "Validate this AI response against the source and constraints:\n\n\
         AI Response: {ai_response}\n\nConstraints: {constraints}\n\n\
         Provide a validation report with confidence score and flagged inconsistencies."
    );

    let completion = llm
        .chat_json(
            "You are a validation assistant. Check accuracy and consistency.",
            &user,
            0.5,
        )
        .await
        .map_err(llm_error)?;

    ai_client::parse_json(&completion).map_err(llm_error)
}

/// Review a report and return structured feedback items, focused per the
/// requested flags.
pub async fn report_feedback(
    llm: &dyn LlmChat,
    report_content: &str,
    flags: ReportFlags,
) -> Result<Vec<FeedbackItem>, ResearchlyError> {
    let mut focus = Vec::new();
    if flags.replicability {
        focus.push("Check for replicability issues");
    }
    if flags.evidence_check {
        focus.push("Verify evidence and citations");
    }
    let focus_text = if focus.is_empty() {
        "General review".to_string()
    } else {
        focus.join("; ")
    };

    let schema = serde_json::to_string(&schemars::schema_for!(ReportFeedback))
        .map_err(|e| ResearchlyError::Internal(e.into()))?;
    let user = format!(
        "Review this research report and provide structured feedback. Focus on: {focus_text}\n\n\
         Report Content:\n{}\n\n\
         Provide feedback as a JSON object matching this schema: {schema}",
        truncate_to_char_boundary(report_content, MAX_REPORT_BYTES)
    );

    let completion = llm
        .chat_json(
            "You are an expert research reviewer. Provide constructive, specific feedback on research reports.",
            &user,
            0.3,
        )
        .await
        .map_err(llm_error)?;

    let parsed: ReportFeedback = ai_client::parse_json(&completion).map_err(llm_error)?;
    Ok(parsed.feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLlm;

    fn source() -> SourceRecord {
        SourceRecord {
            id: "1".into(),
            title: "Machine Learning in Healthcare".into(),
            content: "Research on ML applications...".into(),
        }
    }

    #[tokio::test]
    async fn chat_prompt_follows_mode() {
        let llm = ScriptedLlm::new().with_response("point-form answer");

        let reply = source_chat_response(&llm, &source(), "what are the risks?", ChatMode::Summary)
            .await
            .unwrap();

        assert_eq!(reply, "point-form answer");
        let prompt = &llm.prompts()[0];
        assert!(!prompt.json_mode);
        assert!(prompt.user.starts_with("Based on this research source"));
        assert!(prompt.user.contains("what are the risks?"));
    }

    #[tokio::test]
    async fn validation_report_is_returned_verbatim() {
        let llm = ScriptedLlm::new()
            .with_response(r#"{"confidence":0.9,"inconsistencies":[]}"#);

        let report = validate_response(&llm, "claim", &serde_json::json!({"strict":true}))
            .await
            .unwrap();

        assert_eq!(report["confidence"], 0.9);
    }

    #[tokio::test]
    async fn feedback_focus_reflects_flags() {
        let llm = ScriptedLlm::new().with_response(
            r#"{"feedback":[{"section":"general","issueType":"evidence","suggestion":"cite","confidence":0.8}]}"#,
        );

        let items = report_feedback(
            &llm,
            "report text",
            ReportFlags {
                replicability: true,
                evidence_check: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].issue_type, "evidence");
        let prompt = &llm.prompts()[0];
        assert_eq!(prompt.temperature, 0.3);
        assert!(prompt.user.contains("Check for replicability issues; Verify evidence and citations"));
    }

    #[tokio::test]
    async fn feedback_defaults_to_general_review() {
        let llm = ScriptedLlm::new().with_response(r#"{"feedback":[]}"#);

        report_feedback(&llm, "report text", ReportFlags::default())
            .await
            .unwrap();

        assert!(llm.prompts()[0].user.contains("Focus on: General review"));
    }
}
