use dn_core::{Error, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Entry ids already relayed, per feed.
///
/// Stored as `{"<feed url>": ["<entry id>", ...]}`.
pub struct FeedHistory {
    path: PathBuf,
    feeds: BTreeMap<String, Vec<String>>,
}

impl FeedHistory {
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let feeds = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| Error::State(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, feeds })
    }

    pub fn contains(&self, feed: &str, entry: &str) -> bool {
        self.feeds
            .get(feed)
            .map_or(false, |seen| seen.iter().any(|e| e == entry))
    }

    pub fn mark(&mut self, feed: &str, entry: &str) {
        let seen = self.feeds.entry(feed.to_string()).or_default();
        if !seen.iter().any(|e| e == entry) {
            seen.push(entry.to_string());
        }
    }

    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_string(&self.feeds)?).await?;
        Ok(())
    }
}
