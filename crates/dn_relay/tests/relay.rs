use std::path::PathBuf;
use std::time::Duration;
use dn_relay::cli::{DevToArgs, HumanDuration};
use dn_relay::{handle_command, GlobalArgs, RelayArgs, RelayCommands};
use dn_storage::StateKind;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

const LISTING: &str = r#"[{"id":123,"title":"Test Article","url":"http://example.com","description":"A test description."}]"#;

async fn devto_server() -> (ServerGuard, mockito::Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/articles")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "1".into()),
            Matcher::UrlEncoded("username".into(), "testuser".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(LISTING)
        .create_async()
        .await;
    (server, mock)
}

fn global(output: Option<PathBuf>) -> GlobalArgs {
    GlobalArgs {
        timeout: HumanDuration(Duration::from_secs(5)),
        github_output: output,
    }
}

fn devto_args(api_base: String, last_article_id: Option<&str>, state_file: PathBuf) -> DevToArgs {
    DevToArgs {
        user: "testuser".to_string(),
        api_base,
        last_article_id: last_article_id.map(String::from),
        state_file,
    }
}

#[tokio::test]
async fn bluesky_writes_message_and_new_id() {
    let (server, listing) = devto_server().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("github_output");

    let args = RelayArgs {
        command: RelayCommands::Bluesky {
            devto: devto_args(server.url(), None, dir.path().join("unused.json")),
            message_key: "bluesky_message".to_string(),
            state: StateKind::Output,
        },
    };
    handle_command(args, &global(Some(output.clone()))).await.unwrap();

    listing.assert_async().await;
    let contents = tokio::fs::read_to_string(&output).await.unwrap();
    assert_eq!(
        contents,
        "bluesky_message=Test Article\n\nA test description.\n\nhttp://example.com\nnew_article_id=123\n"
    );
}

#[tokio::test]
async fn bluesky_skips_already_seen_article() {
    let (server, _listing) = devto_server().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("github_output");

    let args = RelayArgs {
        command: RelayCommands::Bluesky {
            devto: devto_args(server.url(), Some("123"), dir.path().join("unused.json")),
            message_key: "bluesky_message".to_string(),
            state: StateKind::Output,
        },
    };
    handle_command(args, &global(Some(output.clone()))).await.unwrap();

    assert!(!output.exists());
}

#[tokio::test]
async fn discord_posts_once_then_stays_quiet() {
    let (mut server, _listing) = devto_server().await;
    let webhook = server
        .mock("POST", "/webhook")
        .match_body(Matcher::Json(json!({"embeds": [{
            "title": "Test Article",
            "url": "http://example.com",
            "description": "A test description.",
            "color": 5814783
        }]})))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("last_checked_devto.json");
    let args = || RelayArgs {
        command: RelayCommands::Discord {
            devto: devto_args(server.url(), None, state_file.clone()),
            webhook_url: format!("{}/webhook", server.url()),
            state: StateKind::File,
        },
    };

    handle_command(args(), &global(None)).await.unwrap();
    handle_command(args(), &global(None)).await.unwrap();

    webhook.assert_async().await;
    let saved = tokio::fs::read_to_string(&state_file).await.unwrap();
    assert_eq!(saved, r#"{"last_article_id":123}"#);
}

#[tokio::test]
async fn discord_failure_leaves_state_untouched() {
    let (mut server, _listing) = devto_server().await;
    server
        .mock("POST", "/webhook")
        .with_status(500)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("last_checked_devto.json");
    let args = RelayArgs {
        command: RelayCommands::Discord {
            devto: devto_args(server.url(), None, state_file.clone()),
            webhook_url: format!("{}/webhook", server.url()),
            state: StateKind::File,
        },
    };

    assert!(handle_command(args, &global(None)).await.is_err());
    assert!(!state_file.exists());
}

#[tokio::test]
async fn rss_relays_unseen_entries() {
    let mut server = Server::new_async().await;
    let feed = r#"<rss version="2.0"><channel><title>Blog</title>
        <item><title>New</title><link>https://blog/new</link><description>&lt;p&gt;Fresh&lt;/p&gt;</description></item>
        <item><title>Old</title><link>https://blog/old</link></item>
    </channel></rss>"#;
    server
        .mock("GET", "/rss.xml")
        .with_header("content-type", "application/rss+xml")
        .with_body(feed)
        .create_async()
        .await;
    let webhook = server
        .mock("POST", "/webhook")
        .match_body(Matcher::PartialJson(json!({"embeds": [{"title": "New", "description": "Fresh"}]})))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let history_file = dir.path().join("last_checked_rss.json");
    let feed_url = format!("{}/rss.xml", server.url());
    tokio::fs::write(&history_file, json!({ feed_url.clone(): ["https://blog/old"] }).to_string())
        .await
        .unwrap();

    let args = RelayArgs {
        command: RelayCommands::Rss {
            feed_url: feed_url.clone(),
            webhook_url: format!("{}/webhook", server.url()),
            history_file: history_file.clone(),
        },
    };
    handle_command(args, &global(None)).await.unwrap();

    webhook.assert_async().await;
    let saved: serde_json::Value =
        serde_json::from_str(&tokio::fs::read_to_string(&history_file).await.unwrap()).unwrap();
    assert_eq!(saved[feed_url.as_str()], json!(["https://blog/old", "https://blog/new"]));
}

#[tokio::test]
async fn rss_history_matches_feed_url_without_path() {
    let mut server = Server::new_async().await;
    let feed = r#"<rss version="2.0"><channel>
        <item><title>Old</title><link>https://blog/old</link></item>
    </channel></rss>"#;
    server.mock("GET", "/").with_body(feed).create_async().await;
    let webhook = server
        .mock("POST", "/webhook")
        .with_status(204)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let history_file = dir.path().join("last_checked_rss.json");
    let feed_url = server.url();
    assert!(!feed_url.ends_with('/'));
    tokio::fs::write(&history_file, json!({ feed_url.clone(): ["https://blog/old"] }).to_string())
        .await
        .unwrap();

    let args = RelayArgs {
        command: RelayCommands::Rss {
            feed_url: feed_url.clone(),
            webhook_url: format!("{}/webhook", server.url()),
            history_file: history_file.clone(),
        },
    };
    handle_command(args, &global(None)).await.unwrap();

    webhook.assert_async().await;
    let saved: serde_json::Value =
        serde_json::from_str(&tokio::fs::read_to_string(&history_file).await.unwrap()).unwrap();
    assert_eq!(saved, json!({ feed_url: ["https://blog/old"] }));
}

#[tokio::test]
async fn bluesky_with_file_state_still_outputs_new_id() {
    let (server, _listing) = devto_server().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("github_output");
    let state_file = dir.path().join("last_checked_devto.json");

    let args = RelayArgs {
        command: RelayCommands::Bluesky {
            devto: devto_args(server.url(), None, state_file.clone()),
            message_key: "bluesky_message".to_string(),
            state: StateKind::File,
        },
    };
    handle_command(args, &global(Some(output.clone()))).await.unwrap();

    let contents = tokio::fs::read_to_string(&output).await.unwrap();
    assert_eq!(
        contents,
        "bluesky_message=Test Article\n\nA test description.\n\nhttp://example.com\nnew_article_id=123\n"
    );
    let saved = tokio::fs::read_to_string(&state_file).await.unwrap();
    assert_eq!(saved, r#"{"last_article_id":123}"#);
}
