use async_trait::async_trait;
use dn_core::{Article, ArticleId, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;
use crate::sources::{utils, ArticleSource};

pub const DEFAULT_API_BASE: &str = "https://dev.to";

/// One entry of `GET /api/articles`. Only the fields we relay.
#[derive(Debug, Deserialize)]
struct ListedArticle {
    id: ArticleId,
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    cover_image: Option<String>,
}

/// Latest article of a dev.to user through the public listing endpoint.
pub struct DevToSource {
    client: Client,
    endpoint: Url,
    username: String,
    name: String,
}

impl DevToSource {
    pub fn new(client: Client, api_base: &str, username: &str) -> Result<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::Config("dev.to username must not be empty".to_string()));
        }
        let endpoint = utils::parse_base_url(api_base)?
            .join("api/articles")
            .map_err(|e| Error::Config(format!("Failed to build listing URL: {}", e)))?;
        Ok(Self {
            client,
            endpoint,
            username: username.to_string(),
            name: format!("dev.to/{}", username),
        })
    }
}

#[async_trait]
impl ArticleSource for DevToSource {
    fn source(&self) -> &str {
        &self.name
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("per_page", "1"), ("username", self.username.as_str())])
            .send()
            .await?;
        let listed: Vec<ListedArticle> = Error::check_status(response)?.json().await?;

        Ok(listed
            .into_iter()
            .map(|a| Article::new(a.id, a.title, a.url, a.description, a.cover_image, &self.name))
            .collect())
    }
}
