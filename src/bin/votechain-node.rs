#![forbid(unsafe_code)]
//! HTTP node for Votechain

use clap::Parser;
use votechain::config::{load_config, DEFAULT_CONFIG_PATH};
use votechain::node::{init_tracing, VotingNode};

#[derive(Parser, Debug)]
#[command(name = "votechain-node", about = "Serve the vote ledger over HTTP")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Listen port (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Required leading hex zeros for mined blocks
    #[arg(short, long)]
    difficulty: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    config.apply_env_overrides();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(difficulty) = args.difficulty {
        config.ledger.difficulty = difficulty;
    }
    config.validate()?;

    init_tracing(&config.server.log_level);

    VotingNode::init(config).start().await
}
