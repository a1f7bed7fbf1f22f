use dn_core::{Article, ArticleId, Notifier, Result, StateStore};
use dn_storage::FeedHistory;
use crate::logging::Logger;
use crate::sources::ArticleSource;

#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// A new article was announced and recorded
    Delivered(Article),
    /// The latest article was already announced
    Unchanged(ArticleId),
    /// The source listed no article at all
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Moves articles from one source to one destination.
pub struct RelayManager {
    source: Box<dyn ArticleSource>,
    notifier: Box<dyn Notifier>,
    logger: Logger,
}

impl RelayManager {
    pub fn new(source: Box<dyn ArticleSource>, notifier: Box<dyn Notifier>) -> Self {
        let logger = Logger::new()
            .with_prefix(source.source())
            .with_prefix(notifier.name());
        Self { source, notifier, logger }
    }

    /// Fetch the latest article and announce it unless `state` already has it.
    ///
    /// State is only written once the notifier succeeded.
    pub async fn relay_latest(&self, state: &dyn StateStore) -> Result<RelayOutcome> {
        let Some(article) = self.source.latest_article().await? else {
            self.logger.warn("No articles found");
            self.notifier.notify_empty().await?;
            return Ok(RelayOutcome::Empty);
        };

        let last_seen = state.last_seen().await?;
        self.logger.debug(&format!(
            "latest article {}, last seen {} (state: {})",
            article.id,
            last_seen.as_ref().map_or_else(|| "none".to_string(), ToString::to_string),
            state.name()
        ));
        if last_seen.as_ref() == Some(&article.id) {
            self.logger.info("No new articles to notify about");
            return Ok(RelayOutcome::Unchanged(article.id));
        }

        self.logger.info(&format!("New article found: {}", article.title));
        self.notifier.notify(&article).await?;
        state.record(&article.id).await?;
        Ok(RelayOutcome::Delivered(article))
    }

    /// Announce every entry not yet in `history`, oldest first.
    ///
    /// A failed announcement does not stop the batch; successful ones are
    /// recorded and the history is saved at the end.
    pub async fn relay_unseen(&self, history: &mut FeedHistory) -> Result<FeedReport> {
        let feed = self.source.source().to_string();
        let articles = self.source.fetch_articles().await?;
        let unseen: Vec<Article> = articles
            .into_iter()
            .filter(|a| !history.contains(&feed, &a.id.to_string()))
            .collect();

        let mut report = FeedReport::default();
        for article in unseen.iter().rev() {
            match self.notifier.notify(article).await {
                Ok(()) => {
                    history.mark(&feed, &article.id.to_string());
                    report.delivered += 1;
                }
                Err(e) => {
                    self.logger.error(&format!("Failed to send message for {}: {}", article.title, e));
                    report.failed += 1;
                }
            }
        }

        history.save().await?;
        self.logger.info(&format!("Processed {} new entries", unseen.len()));
        Ok(report)
    }
}
