pub mod file;
pub mod history;
pub mod memory;
pub mod output;

pub use file::JsonFileState;
pub use history::FeedHistory;
pub use memory::MemoryState;
pub use output::OutputState;
