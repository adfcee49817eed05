//! Aggregate counters derived from ledger and buffer state.

use serde::{Deserialize, Serialize};

use crate::blockchain::Blockchain;
use crate::mempool::VoteBatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStats {
    /// Blocks on the chain, genesis included.
    pub total_blocks: usize,
    /// Votes committed to blocks. Pending votes are not counted.
    pub total_votes: usize,
    pub pending_votes: usize,
}

/// Read-only reporter; holds no state of its own.
pub struct StatsReporter;

impl StatsReporter {
    pub fn report(chain: &Blockchain, batcher: &VoteBatcher) -> ChainStats {
        ChainStats {
            total_blocks: chain.len(),
            total_votes: chain.total_votes(),
            pending_votes: batcher.pending_count(),
        }
    }
}
