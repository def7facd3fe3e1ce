use async_trait::async_trait;
use tokio::sync::RwLock;

use researchly_common::SourceRecord;

use crate::mock;

/// Source storage seam. The demo ships the in-memory implementation below; a
/// real deployment would put a database adapter behind the same trait.
#[async_trait]
pub trait SourceStore: Send + Sync {
    async fn list(&self) -> Vec<SourceRecord>;

    async fn get(&self, id: &str) -> Option<SourceRecord>;

    /// Append user interaction log entries; returns how many were stored.
    async fn log_actions(&self, actions: Vec<serde_json::Value>) -> usize;
}

/// In-memory store seeded with the demo sources.
pub struct InMemorySourceStore {
    sources: RwLock<Vec<SourceRecord>>,
    action_log: RwLock<Vec<serde_json::Value>>,
}

impl InMemorySourceStore {
    pub fn seeded() -> Self {
        Self {
            sources: RwLock::new(mock::mock_sources()),
            action_log: RwLock::new(Vec::new()),
        }
    }

    pub fn with_sources(sources: Vec<SourceRecord>) -> Self {
        Self {
            sources: RwLock::new(sources),
            action_log: RwLock::new(Vec::new()),
        }
    }

    pub async fn logged_count(&self) -> usize {
        self.action_log.read().await.len()
    }
}

#[async_trait]
impl SourceStore for InMemorySourceStore {
    async fn list(&self) -> Vec<SourceRecord> {
        self.sources.read().await.clone()
    }

    async fn get(&self, id: &str) -> Option<SourceRecord> {
        self.sources.read().await.iter().find(|s| s.id == id).cloned()
    }

    async fn log_actions(&self, actions: Vec<serde_json::Value>) -> usize {
        let count = actions.len();
        self.action_log.write().await.extend(actions);
        count
    }
}
