use async_trait::async_trait;
use dn_core::{Article, ArticleId, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;
use crate::sources::{utils, ArticleSource};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    guid: Option<Guid>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Guid {
    #[serde(rename = "$text", default)]
    value: String,
}

impl Item {
    /// Entries are keyed by link, falling back to the guid.
    fn entry_id(&self) -> Option<String> {
        self.link
            .as_deref()
            .or(self.guid.as_ref().map(|g| g.value.as_str()))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
    }
}

/// Entries of an RSS 2.0 feed, in feed order (newest first).
pub struct RssSource {
    client: Client,
    feed_url: Url,
    /// The URL exactly as configured; history files are keyed by it
    key: String,
}

impl RssSource {
    pub fn new(client: Client, feed_url: &str) -> Result<Self> {
        let key = feed_url.trim().to_string();
        let feed_url = Url::parse(&key)
            .map_err(|e| Error::Config(format!("Failed to parse feed URL {}: {}", key, e)))?;
        Ok(Self { client, feed_url, key })
    }

    fn parse(&self, body: &str) -> Result<Vec<Article>> {
        let feed: Rss = quick_xml::de::from_str(body)?;
        let mut articles = Vec::with_capacity(feed.channel.items.len());
        for item in feed.channel.items {
            let Some(id) = item.entry_id() else {
                tracing::warn!("skipping entry without link or guid in {}", self.feed_url);
                continue;
            };
            let description = item.description.as_deref().map(utils::strip_html);
            let url = item.link.clone().or_else(|| Some(id.clone()));
            articles.push(Article::new(
                ArticleId::Text(id),
                item.title.map(|t| t.trim().to_string()),
                url,
                description,
                None,
                &self.key,
            ));
        }
        Ok(articles)
    }
}

#[async_trait]
impl ArticleSource for RssSource {
    fn source(&self) -> &str {
        &self.key
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let response = self.client.get(self.feed_url.clone()).send().await?;
        let body = Error::check_status(response)?.text().await?;
        self.parse(&body)
    }
}
