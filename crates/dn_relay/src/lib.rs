pub mod cli;
pub mod logging;
pub mod manager;
pub mod sources;

pub use cli::{handle_command, GlobalArgs, RelayArgs, RelayCommands};
pub use logging::{init_logging, Logger};
pub use manager::{FeedReport, RelayManager, RelayOutcome};
pub use sources::ArticleSource;

