use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::ledger::{SharedLedger, VotingLedger};

/// Install the global `tracing` subscriber. `RUST_LOG` wins over `default_level`.
/// Calling this more than once is harmless.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Process-level owner of the ledger and its configuration.
pub struct VotingNode {
    pub config: Config,
    pub ledger: SharedLedger,
}

impl VotingNode {
    pub fn init(config: Config) -> Self {
        info!(
            difficulty = config.ledger.difficulty,
            batch_size = config.ledger.batch_size,
            mining_timeout_secs = ?config.ledger.mining_timeout_secs,
            "Starting Votechain node"
        );

        let ledger = VotingLedger::from_config(&config.ledger).into_shared();
        Self { config, ledger }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, Box<dyn std::error::Error>> {
        let addr = self.config.listen_addr();
        addr.parse::<SocketAddr>()
            .map_err(|e| format!("Invalid listen address {}: {}", addr, e).into())
    }

    #[cfg(feature = "api")]
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.listen_addr()?;
        let api_node = std::sync::Arc::new(crate::api::Node::new_shared(self.ledger.clone()));
        crate::api::run_api_server(api_node, addr).await
    }

    #[cfg(not(feature = "api"))]
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        Err("API feature not enabled in this build".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_builds_genesis_ledger() {
        let mut config = Config::default();
        config.ledger.difficulty = 1;
        let node = VotingNode::init(config);
        let ledger = node.ledger.try_read().unwrap();
        assert_eq!(ledger.snapshot().len(), 1);
        assert!(ledger.validate());
    }

    #[test]
    fn test_listen_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9000;
        let node = VotingNode::init(config);
        assert_eq!(node.listen_addr().unwrap().port(), 9000);

        let mut config = Config::default();
        config.server.host = "not a host".to_string();
        assert!(VotingNode::init(config).listen_addr().is_err());
    }
}
