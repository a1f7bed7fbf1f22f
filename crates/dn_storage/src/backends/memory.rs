use async_trait::async_trait;
use dn_core::{ArticleId, Result, StateStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process state, handy for dry runs and tests.
#[derive(Clone, Default)]
pub struct MemoryState {
    last_seen: Arc<RwLock<Option<ArticleId>>>,
    writes: Arc<RwLock<usize>>,
}

impl MemoryState {
    pub fn new(last_seen: Option<ArticleId>) -> Self {
        Self {
            last_seen: Arc::new(RwLock::new(last_seen)),
            writes: Arc::new(RwLock::new(0)),
        }
    }

    /// Number of times [`StateStore::record`] was called
    pub async fn writes(&self) -> usize {
        *self.writes.read().await
    }
}

#[async_trait]
impl StateStore for MemoryState {
    fn name(&self) -> &str {
        "memory"
    }

    async fn last_seen(&self) -> Result<Option<ArticleId>> {
        Ok(self.last_seen.read().await.clone())
    }

    async fn record(&self, id: &ArticleId) -> Result<()> {
        *self.last_seen.write().await = Some(id.clone());
        *self.writes.write().await += 1;
        Ok(())
    }
}
