use async_trait::async_trait;
use dn_core::{ArticleId, Error, OutputSink, Result, StateStore};
use crate::backends::output::NEW_ARTICLE_ID_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk shape. Older runs wrote `{"id": ...}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(alias = "id", default)]
    last_article_id: Option<ArticleId>,
}

/// Keeps the last-seen identifier in a JSON file.
pub struct JsonFileState {
    path: PathBuf,
    publish: Option<OutputSink>,
}

impl JsonFileState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            publish: None,
        }
    }

    /// Also announce every recorded id as a `new_article_id` step output.
    pub fn publishing_to(mut self, sink: OutputSink) -> Self {
        self.publish = Some(sink);
        self
    }

    async fn load(&self) -> Result<StateFile> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StateFile::default()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(StateFile::default());
        }
        serde_json::from_str(&raw)
            .map_err(|e| Error::State(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl StateStore for JsonFileState {
    fn name(&self) -> &str {
        "file"
    }

    async fn last_seen(&self) -> Result<Option<ArticleId>> {
        Ok(self.load().await?.last_article_id)
    }

    async fn record(&self, id: &ArticleId) -> Result<()> {
        let state = StateFile {
            last_article_id: Some(id.clone()),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_string(&state)?).await?;
        tracing::debug!("saved last article id {} to {}", id, self.path.display());
        if let Some(sink) = &self.publish {
            sink.append(NEW_ARTICLE_ID_KEY, &id.to_string()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_unseen() {
        let dir = tempfile::tempdir().unwrap();
        let state = JsonFileState::new(dir.path().join("state.json"));
        assert_eq!(state.last_seen().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_record_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let state = JsonFileState::new(&path);

        state.record(&ArticleId::Numeric(123)).await.unwrap();

        assert_eq!(state.last_seen().await.unwrap(), Some(ArticleId::Numeric(123)));
        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(raw, r#"{"last_article_id":123}"#);
    }

    #[tokio::test]
    async fn test_record_can_publish_step_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let output = dir.path().join("github_output");
        let state = JsonFileState::new(&path).publishing_to(OutputSink::File(output.clone()));

        state.record(&ArticleId::Numeric(123)).await.unwrap();

        assert_eq!(state.last_seen().await.unwrap(), Some(ArticleId::Numeric(123)));
        let contents = tokio::fs::read_to_string(&output).await.unwrap();
        assert_eq!(contents, "new_article_id=123\n");
    }

    #[tokio::test]
    async fn test_reads_legacy_and_null_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state = JsonFileState::new(&path);

        tokio::fs::write(&path, r#"{"id": 99}"#).await.unwrap();
        assert_eq!(state.last_seen().await.unwrap(), Some(ArticleId::Numeric(99)));

        tokio::fs::write(&path, r#"{"last_article_id": null}"#).await.unwrap();
        assert_eq!(state.last_seen().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let err = JsonFileState::new(&path).last_seen().await.unwrap_err();
        assert!(matches!(err, Error::State(_)));
    }
}
