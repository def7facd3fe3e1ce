pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, FallbackPolicy};
pub use error::ResearchlyError;
pub use types::*;
