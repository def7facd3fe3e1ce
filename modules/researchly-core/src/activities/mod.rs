mod analyze;
mod generate_queries;
mod report;
mod source_support;

pub use analyze::analyze_content;
pub use generate_queries::generate_search_queries;
pub use report::generate_research_report;
pub use source_support::{report_feedback, source_chat_response, validate_response};

use ai_client::AiError;
use researchly_common::ResearchlyError;

/// Lift a provider error into the domain taxonomy. Shape mismatches keep
/// their identity; everything else is a generic LLM failure.
pub(crate) fn llm_error(e: AiError) -> ResearchlyError {
    match e {
        AiError::MalformedResponse(err) => ResearchlyError::MalformedResponse(err.to_string()),
        other => ResearchlyError::Llm(other.to_string()),
    }
}
