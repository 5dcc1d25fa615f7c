//! fanmq – broker daemon.
//
//  $ fanmq start --config fanmq.toml

use std::path::Path;

use clap::{Parser, Subcommand};
use fanmq::{load_config, start_broker, Config};

#[derive(Debug, Parser)]
#[command(name = "fanmq", version, about = "fanmq broker daemon")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the broker daemon.
    Start {
        /// Path to config TOML (env FANMQ_CONFIG overrides)
        #[arg(short, long, default_value = "fanmq.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fanmq::logging::init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Start { config } => {
            let cfg_path: String = std::env::var("FANMQ_CONFIG").unwrap_or(config);
            let cfg: Config = if Path::new(&cfg_path).exists() {
                load_config(&cfg_path)?
            } else {
                Config::default()
            };
            println!("📡 fanmq broker listening on {}", cfg.server.bind_addr);
            start_broker(cfg).await?;
        }
    }

    Ok(())
}
