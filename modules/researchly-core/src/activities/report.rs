use researchly_common::{ContentAnalysis, ResearchlyError};

use super::llm_error;
use crate::traits::LlmChat;

/// Synthesize the final report from every analysis round. The report body is
/// returned verbatim as structured JSON.
pub async fn generate_research_report(
    llm: &dyn LlmChat,
    original_query: &str,
    analyses: &[ContentAnalysis],
) -> Result<serde_json::Value, ResearchlyError> {
    let system = format!(
        "Compile comprehensive report on \"{original_query}\" from analyses. \
         Return structured JSON."
    );
    let user =
        serde_json::to_string(analyses).map_err(|e| ResearchlyError::Internal(e.into()))?;

    let completion = llm.chat_json(&system, &user, 0.5).await.map_err(llm_error)?;

    ai_client::parse_json(&completion).map_err(llm_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLlm;

    #[tokio::test]
    async fn returns_report_body_verbatim() {
        let llm = ScriptedLlm::new()
            .with_response(r#"{"title":"Report","sections":[{"heading":"A","body":"text"}]}"#);
        let analyses = vec![ContentAnalysis {
            summary: "s".into(),
            ..Default::default()
        }];

        let report = generate_research_report(&llm, "orig", &analyses).await.unwrap();

        assert_eq!(report["title"], "Report");
        assert_eq!(report["sections"][0]["heading"], "A");

        let prompt = &llm.prompts()[0];
        assert!(prompt.user.contains("\"summary\":\"s\""));
    }
}
