use async_trait::async_trait;
use dn_core::{Article, Error, Notifier, Result};
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// Embed accent colour (a blue)
pub const EMBED_COLOR: u32 = 5814783;

#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub embeds: Vec<Embed<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Embed<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub description: &'a str,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct EmbedImage<'a> {
    pub url: &'a str,
}

impl<'a> WebhookPayload<'a> {
    pub fn for_article(article: &'a Article) -> Self {
        Self {
            embeds: vec![Embed {
                title: &article.title,
                url: &article.url,
                description: &article.description,
                color: EMBED_COLOR,
                image: article.cover_image.as_deref().map(|url| EmbedImage { url }),
            }],
        }
    }
}

/// Posts each article as a single rich embed to a Discord webhook.
pub struct DiscordNotifier {
    client: Client,
    webhook_url: Url,
}

impl DiscordNotifier {
    pub fn new(client: Client, webhook_url: &str) -> Result<Self> {
        let webhook_url = Url::parse(webhook_url)
            .map_err(|e| Error::Config(format!("Invalid webhook URL: {}", e)))?;
        Ok(Self { client, webhook_url })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &str {
        "discord"
    }

    async fn notify(&self, article: &Article) -> Result<()> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&WebhookPayload::for_article(article))
            .send()
            .await?;
        Error::check_status(response)?;
        tracing::info!("Sent message for: {}", article.title);
        Ok(())
    }
}
