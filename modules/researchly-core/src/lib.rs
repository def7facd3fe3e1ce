pub mod activities;
pub mod adapters;
pub mod batch;
pub mod pipeline;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use adapters::{FirecrawlExtractor, FirecrawlSearcher};
pub use batch::{batch_extract, successes, BatchConfig};
pub use pipeline::{PipelineConfig, ResearchPipeline};
pub use traits::{ContentExtractor, LlmChat, WebSearcher};
