use ai_client::truncate_to_char_boundary;
use researchly_common::{ContentAnalysis, ExtractedContent, ResearchlyError};

use super::llm_error;
use crate::traits::LlmChat;

/// Per-source cap on content fed into one analysis prompt.
const MAX_SOURCE_BYTES: usize = 5000;

/// Analyze a round of extracted content against the original query.
///
/// `depth`/`max_depth` appear in the prompt only; the caller drives the
/// follow-up loop. The completion must match the `ContentAnalysis` shape;
/// non-JSON output fails fast with `MalformedResponse`.
pub async fn analyze_content(
    llm: &dyn LlmChat,
    original_query: &str,
    contents: &[ExtractedContent],
    depth: usize,
    max_depth: usize,
) -> Result<ContentAnalysis, ResearchlyError> {
    let mut content_text = String::new();
    for content in contents {
        let body = truncate_to_char_boundary(&content.content, MAX_SOURCE_BYTES);
        content_text.push_str(&format!(
            "\nSOURCE: {}\nURL: {}\nCONTENT:\n{}\n---\n",
            content.title, content.url, body
        ));
    }

    let schema = serde_json::to_string(&schemars::schema_for!(ContentAnalysis))
        .map_err(|e| ResearchlyError::Internal(e.into()))?;
    let system = format!(
        "Analyze content for \"{original_query}\". \
         Return a JSON object matching this schema: {schema}. \
         Include followUpQueries only if depth {depth} < {max_depth}."
    );

    let completion = llm
        .chat_json(&system, &content_text, 0.5)
        .await
        .map_err(llm_error)?;

    ai_client::parse_json(&completion).map_err(llm_error)
}
