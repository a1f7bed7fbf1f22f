//! `key=value` output channel of a CI job runner.
//!
//! GitHub Actions exposes a file through `GITHUB_OUTPUT`; every appended
//! `key=value` line becomes a step output. Without such a file the lines go to
//! stdout so a local run still shows what would have been published.

use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    File(PathBuf),
    Stdout,
}

impl OutputSink {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => OutputSink::File(path),
            _ => OutputSink::Stdout,
        }
    }

    /// Appends a single `key=value\n` line. The value is written verbatim.
    pub async fn append(&self, key: &str, value: &str) -> Result<()> {
        let line = format!("{}={}\n", key, value);
        match self {
            OutputSink::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
                file.write_all(line.as_bytes()).await?;
                file.flush().await?;
            }
            OutputSink::Stdout => print!("{}", line),
        }
        tracing::debug!("wrote output {}", key);
        Ok(())
    }
}
