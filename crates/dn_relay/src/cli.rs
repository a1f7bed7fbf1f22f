use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use clap::{Args, Subcommand};
use dn_core::{ArticleId, Error, OutputSink, Result};
use dn_notifiers::output::DEFAULT_MESSAGE_KEY;
use dn_notifiers::{DeferredOutputNotifier, DiscordNotifier};
use dn_storage::{create_state, FeedHistory, StateConfig, StateKind, DEFAULT_HISTORY_FILE, DEFAULT_STATE_FILE};
use reqwest::Client;
use tracing::info;
use crate::manager::{RelayManager, RelayOutcome};
use crate::sources::devto::DEFAULT_API_BASE;
use crate::sources::{DevToSource, RssSource};

const USER_AGENT: &str = concat!("devto-notify/", env!("CARGO_PKG_VERSION"));

/// Request timeout written as unit-suffixed parts: `30s`, `1m30s`, `2h`.
/// A bare number counts as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let input = s.trim();
        let too_large = || format!("Duration {} is too large", input);
        let mut rest = input;
        let mut seconds: u64 = 0;

        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits == 0 {
                return Err(format!("Expected a number in duration {:?}", input));
            }
            let value: u64 = rest[..digits].parse().map_err(|_| too_large())?;
            rest = &rest[digits..];

            let scale = match rest.chars().next() {
                None => 1,
                Some('s') => 1,
                Some('m') => 60,
                Some('h') => 3600,
                Some(unit) => return Err(format!("Invalid duration unit: {}", unit)),
            };
            if !rest.is_empty() {
                rest = &rest[1..];
            }

            seconds = value
                .checked_mul(scale)
                .and_then(|part| seconds.checked_add(part))
                .ok_or_else(too_large)?;
        }

        if seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(seconds)))
    }
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Timeout for each HTTP request (e.g. 30s, 1m30s)
    #[arg(long, global = true, env = "DN_TIMEOUT", default_value = "30s")]
    pub timeout: HumanDuration,

    /// Step output file of the job runner; lines go to stdout when unset
    #[arg(long, global = true, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DevToArgs {
    /// dev.to user whose latest article is relayed
    #[arg(long, env = "DEVTO_USER")]
    pub user: String,

    /// Base URL of the dev.to API
    #[arg(long, env = "DEVTO_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Identifier of the last announced article, for runner-tracked state
    #[arg(long, env = "LAST_ARTICLE_ID")]
    pub last_article_id: Option<String>,

    /// JSON file holding the last announced article, for file state
    #[arg(long, env = "DN_STATE_FILE", default_value = DEFAULT_STATE_FILE)]
    pub state_file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct RelayArgs {
    #[command(subcommand)]
    pub command: RelayCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RelayCommands {
    /// Write the latest dev.to article as a step output for a later Bluesky post
    Bluesky {
        #[command(flatten)]
        devto: DevToArgs,
        /// Output key of the formatted message
        #[arg(long, default_value = DEFAULT_MESSAGE_KEY)]
        message_key: String,
        #[arg(long, value_enum, default_value_t = StateKind::Output)]
        state: StateKind,
    },
    /// Post the latest dev.to article to a Discord webhook
    Discord {
        #[command(flatten)]
        devto: DevToArgs,
        #[arg(long, env = "DISCORD_WEBHOOK_URL")]
        webhook_url: String,
        #[arg(long, value_enum, default_value_t = StateKind::File)]
        state: StateKind,
    },
    /// Post every unseen entry of an RSS feed to a Discord webhook
    Rss {
        #[arg(long, env = "RSS_FEED_URL")]
        feed_url: String,
        #[arg(long, env = "DISCORD_WEBHOOK_URL")]
        webhook_url: String,
        /// JSON file of already announced entries, per feed
        #[arg(long, env = "DN_HISTORY_FILE", default_value = DEFAULT_HISTORY_FILE)]
        history_file: PathBuf,
    },
}

pub fn build_client(global: &GlobalArgs) -> Result<Client> {
    Ok(Client::builder()
        .timeout(global.timeout.0)
        .user_agent(USER_AGENT)
        .build()?)
}

fn state_config(devto: &DevToArgs, kind: StateKind, sink: OutputSink, publish_id: bool) -> StateConfig {
    StateConfig {
        kind,
        file: devto.state_file.clone(),
        last_article_id: devto.last_article_id.as_deref().and_then(ArticleId::parse),
        sink,
        publish_id,
    }
}

fn report(outcome: &RelayOutcome) {
    match outcome {
        RelayOutcome::Delivered(article) => info!("✅ Relayed article {} - {}", article.id, article.url),
        RelayOutcome::Unchanged(id) => info!("⏭️ Article {} was already relayed", id),
        RelayOutcome::Empty => info!("📭 Nothing to relay"),
    }
}

pub async fn handle_command(args: RelayArgs, global: &GlobalArgs) -> Result<()> {
    let client = build_client(global)?;
    let sink = OutputSink::from_path(global.github_output.clone());

    match args.command {
        RelayCommands::Bluesky { devto, message_key, state } => {
            let source = DevToSource::new(client, &devto.api_base, &devto.user)?;
            let notifier = DeferredOutputNotifier::new(sink.clone(), message_key);
            // The runner always needs the new id next to the message
            let store = create_state(state_config(&devto, state, sink, true));
            let manager = RelayManager::new(Box::new(source), Box::new(notifier));
            report(&manager.relay_latest(store.as_ref()).await?);
        }
        RelayCommands::Discord { devto, webhook_url, state } => {
            let source = DevToSource::new(client.clone(), &devto.api_base, &devto.user)?;
            let notifier = DiscordNotifier::new(client, &webhook_url)?;
            let store = create_state(state_config(&devto, state, sink, false));
            let manager = RelayManager::new(Box::new(source), Box::new(notifier));
            report(&manager.relay_latest(store.as_ref()).await?);
        }
        RelayCommands::Rss { feed_url, webhook_url, history_file } => {
            let source = RssSource::new(client.clone(), &feed_url)?;
            let notifier = DiscordNotifier::new(client, &webhook_url)?;
            let mut history = FeedHistory::load(history_file).await?;
            let manager = RelayManager::new(Box::new(source), Box::new(notifier));
            let feed_report = manager.relay_unseen(&mut history).await?;
            info!("📰 Relayed {} new entries from {}", feed_report.delivered, feed_url);
            if feed_report.failed > 0 {
                return Err(Error::Notify(format!(
                    "{} of {} entries could not be sent",
                    feed_report.failed,
                    feed_report.failed + feed_report.delivered
                )));
            }
        }
    }
    Ok(())
}
