use async_trait::async_trait;
use dn_core::{Article, Result};

pub mod devto;
pub mod rss;

pub use devto::DevToSource;
pub use rss::RssSource;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Stable name of the source; also keys the per-feed history
    fn source(&self) -> &str;

    /// Fetches the listing, newest article first
    async fn fetch_articles(&self) -> Result<Vec<Article>>;

    /// The most recent article, if the listing is not empty
    async fn latest_article(&self) -> Result<Option<Article>> {
        Ok(self.fetch_articles().await?.into_iter().next())
    }
}

/// Common utilities for sources
pub(crate) mod utils {
    use dn_core::{Error, Result};
    use scraper::Html;
    use url::Url;

    /// Parses a base URL, making sure relative joins append instead of replacing
    /// the last path segment.
    pub fn parse_base_url(raw: &str) -> Result<Url> {
        let mut url = Url::parse(raw).map_err(|e| Error::Config(format!("Failed to parse URL {}: {}", raw, e)))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Drops markup from an HTML fragment, keeping its text.
    pub fn strip_html(fragment: &str) -> String {
        Html::parse_fragment(fragment)
            .root_element()
            .text()
            .collect::<String>()
            .trim()
            .to_string()
    }
}
