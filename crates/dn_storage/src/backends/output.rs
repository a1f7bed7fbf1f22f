use async_trait::async_trait;
use dn_core::{ArticleId, OutputSink, Result, StateStore};

pub const NEW_ARTICLE_ID_KEY: &str = "new_article_id";

/// State tracked outside the job.
///
/// The runner hands the previous identifier in (usually `LAST_ARTICLE_ID`) and
/// picks the new one up from the `new_article_id` step output.
pub struct OutputState {
    last_seen: Option<ArticleId>,
    sink: OutputSink,
}

impl OutputState {
    pub fn new(last_seen: Option<ArticleId>, sink: OutputSink) -> Self {
        Self { last_seen, sink }
    }
}

#[async_trait]
impl StateStore for OutputState {
    fn name(&self) -> &str {
        "output"
    }

    async fn last_seen(&self) -> Result<Option<ArticleId>> {
        Ok(self.last_seen.clone())
    }

    async fn record(&self, id: &ArticleId) -> Result<()> {
        self.sink.append(NEW_ARTICLE_ID_KEY, &id.to_string()).await
    }
}
