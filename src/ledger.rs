//! The chain and its pending buffer as one owned unit.
//!
//! Everything that mutates either half goes through [`VotingLedger`], so a
//! single lock around it serializes submissions against each other and
//! against readers.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::blockchain::{Block, Blockchain};
use crate::config::LedgerConfig;
use crate::error::ChainError;
use crate::mempool::{SubmitOutcome, VoteBatcher};
use crate::miner::MiningLimits;
use crate::stats::{ChainStats, StatsReporter};
use crate::vote::Vote;

/// Handle shared between request handlers.
pub type SharedLedger = Arc<RwLock<VotingLedger>>;

#[derive(Debug, Clone)]
pub struct VotingLedger {
    chain: Blockchain,
    batcher: VoteBatcher,
    mining_timeout: Option<Duration>,
}

impl VotingLedger {
    pub fn new(difficulty: usize, batch_size: usize) -> Self {
        VotingLedger {
            chain: Blockchain::new(difficulty),
            batcher: VoteBatcher::with_batch_size(batch_size),
            mining_timeout: None,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.difficulty, config.batch_size).with_mining_timeout(config.mining_timeout())
    }

    /// Bound each mining run; `None` mines until a nonce is found.
    pub fn with_mining_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.mining_timeout = timeout;
        self
    }

    pub fn into_shared(self) -> SharedLedger {
        Arc::new(RwLock::new(self))
    }

    pub fn submit_vote(&mut self, vote: Vote) -> Result<SubmitOutcome, ChainError> {
        let limits = match self.mining_timeout {
            Some(timeout) => MiningLimits::default().with_timeout(timeout),
            None => MiningLimits::unbounded(),
        };
        self.batcher.submit_with_limits(&mut self.chain, vote, &limits)
    }

    pub fn snapshot(&self) -> &[Block] {
        self.chain.snapshot()
    }

    pub fn validate(&self) -> bool {
        self.chain.validate()
    }

    pub fn report(&self) -> ChainStats {
        StatsReporter::report(&self.chain, &self.batcher)
    }

    pub fn blockchain(&self) -> &Blockchain {
        &self.chain
    }

    pub fn batcher(&self) -> &VoteBatcher {
        &self.batcher
    }
}
