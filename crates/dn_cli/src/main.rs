use std::process::ExitCode;
use clap::Parser;
use dn_relay::{handle_command, init_logging, GlobalArgs, RelayArgs};
use tracing::error;

/// Announces a blog's newest article once, then stays quiet until the next one.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(flatten)]
    global: GlobalArgs,
    #[command(flatten)]
    relay: RelayArgs,
}

async fn run(cli: Cli) -> dn_core::Result<()> {
    handle_command(cli.relay, &cli.global).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
