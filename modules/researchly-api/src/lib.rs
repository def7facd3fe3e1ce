pub mod error;
pub mod mock;
pub mod rest;
pub mod state;
pub mod store;

pub use state::{build_router, AppState};
pub use store::{InMemorySourceStore, SourceStore};
