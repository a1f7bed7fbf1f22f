use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Name of the destination, used in log lines
    fn name(&self) -> &str;

    /// Announce a new article
    async fn notify(&self, article: &Article) -> Result<()>;

    /// Called when the source returned no article at all
    async fn notify_empty(&self) -> Result<()> {
        Ok(())
    }
}
