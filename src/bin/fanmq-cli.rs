//! CLI client for a running fanmq broker.
//!
//! Subscribe and print broadcast messages as they arrive, or publish a
//! single message and exit.

use clap::{Parser, Subcommand};
use tracing::info;

use fanmq::client::{Publisher, Subscription};

/// Command-line interface for fanmq.
#[derive(Debug, Parser)]
#[command(
    name = "fanmq-cli",
    version,
    about = "fanmq CLI: pub/sub against a running broker"
)]
pub struct Cli {
    /// Address of the broker (e.g. 127.0.0.1:8080)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    pub addr: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Subscribe and print each broadcast message until the connection ends
    Sub,

    /// Publish a message
    Pub {
        /// Message payload (enclose in quotes for spaces)
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fanmq::logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Sub => {
            let mut subscription = Subscription::connect(&cli.addr).await?;
            info!(addr = %cli.addr, "subscribed, waiting for published messages");

            while let Some(payload) = subscription.next_message().await? {
                println!("{}", String::from_utf8_lossy(&payload));
            }

            info!("subscription ended");
        }

        Command::Pub { message } => {
            Publisher::new(&cli.addr).publish(message.into_bytes()).await?;
            println!("published to {}", cli.addr);
        }
    }

    Ok(())
}
