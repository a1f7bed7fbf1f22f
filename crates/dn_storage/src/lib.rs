use dn_core::{ArticleId, OutputSink, StateStore};
use std::fmt;
use std::path::PathBuf;

pub mod backends;

pub use backends::*;

pub const DEFAULT_STATE_FILE: &str = "last_checked_devto.json";
pub const DEFAULT_HISTORY_FILE: &str = "last_checked_rss.json";

/// Where the last-seen article identifier lives between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StateKind {
    /// A small JSON file next to the job
    File,
    /// Tracked by the job runner: read from an override, written as a step output
    Output,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKind::File => f.write_str("file"),
            StateKind::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StateConfig {
    pub kind: StateKind,
    pub file: PathBuf,
    pub last_article_id: Option<ArticleId>,
    pub sink: OutputSink,
    /// Write `new_article_id` to the sink even when the id lives in a file
    pub publish_id: bool,
}

pub fn create_state(config: StateConfig) -> Box<dyn StateStore> {
    match config.kind {
        StateKind::File => {
            if config.last_article_id.is_some() {
                tracing::warn!("ignoring last article id override, state is read from {}", config.file.display());
            }
            let state = JsonFileState::new(config.file);
            if config.publish_id {
                Box::new(state.publishing_to(config.sink))
            } else {
                Box::new(state)
            }
        }
        StateKind::Output => Box::new(OutputState::new(config.last_article_id, config.sink)),
    }
}
