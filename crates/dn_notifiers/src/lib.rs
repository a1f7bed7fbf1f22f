pub mod discord;
pub mod output;

pub use discord::DiscordNotifier;
pub use output::DeferredOutputNotifier;

