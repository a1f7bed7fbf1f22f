use async_trait::async_trait;
use dn_core::{Article, Notifier, OutputSink, Result};

pub const DEFAULT_MESSAGE_KEY: &str = "bluesky_message";

/// Leaves delivery to the job runner: the formatted message is written as a
/// step output and a later step posts it.
pub struct DeferredOutputNotifier {
    sink: OutputSink,
    key: String,
}

impl DeferredOutputNotifier {
    pub fn new(sink: OutputSink, key: impl Into<String>) -> Self {
        Self { sink, key: key.into() }
    }
}

#[async_trait]
impl Notifier for DeferredOutputNotifier {
    fn name(&self) -> &str {
        &self.key
    }

    async fn notify(&self, article: &Article) -> Result<()> {
        let message = article.plain_message();
        tracing::info!("Prepared message:\n{}", message);
        self.sink.append(&self.key, &message).await
    }

    async fn notify_empty(&self) -> Result<()> {
        self.sink.append(&self.key, "").await
    }
}
