use researchly_common::{QueryExpansion, ResearchlyError};

use super::llm_error;
use crate::traits::LlmChat;

/// Expand a research topic into `count` distinct search queries.
///
/// The provider answers with a JSON object holding a `queries` array; an
/// object without that key yields an empty list.
pub async fn generate_search_queries(
    llm: &dyn LlmChat,
    topic: &str,
    count: usize,
) -> Result<Vec<String>, ResearchlyError> {
    let system = format!(
        "Generate {count} different search queries for: {topic}. \
         Return a JSON object with a 'queries' array containing the search queries."
    );
    let user = format!("Topic: {topic}");

    let completion = llm.chat_json(&system, &user, 0.7).await.map_err(llm_error)?;
    let expansion: QueryExpansion = ai_client::parse_json(&completion).map_err(llm_error)?;

    Ok(expansion.queries)
}
