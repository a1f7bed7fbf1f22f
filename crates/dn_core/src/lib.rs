pub mod error;
pub mod notifier;
pub mod output;
pub mod storage;
pub mod types;

pub use error::Error;
pub use notifier::Notifier;
pub use output::OutputSink;
pub use storage::StateStore;
pub use types::{Article, ArticleId, DEFAULT_DESCRIPTION, DEFAULT_TITLE};

pub type Result<T> = std::result::Result<T, Error>;
