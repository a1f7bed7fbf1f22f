use async_trait::async_trait;
use crate::types::ArticleId;
use crate::Result;

#[async_trait]
pub trait StateStore: Send + Sync {
    /// Name of the backend, used in log lines
    fn name(&self) -> &str;

    /// Identifier of the last article already relayed, if any
    async fn last_seen(&self) -> Result<Option<ArticleId>>;

    /// Replace the last-seen identifier after a successful relay
    async fn record(&self, id: &ArticleId) -> Result<()>;
}
