//! Pending vote buffer and size-triggered batching.
//!
//! Votes collect here until the buffer reaches the batch size, at which
//! point the whole buffer is mined into one block in submission order.

use serde::Serialize;

use crate::blockchain::{Block, Blockchain};
use crate::error::ChainError;
use crate::miner::MiningLimits;
use crate::vote::Vote;

/// Number of votes that triggers a new block.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Result of submitting a vote. Serialized untagged, so clients receive
/// either the stamped vote or the freshly mined block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmitOutcome {
    Accepted(Vote),
    BlockMined(Block),
}

impl SubmitOutcome {
    pub fn is_block(&self) -> bool {
        matches!(self, SubmitOutcome::BlockMined(_))
    }
}

#[derive(Debug, Clone)]
pub struct VoteBatcher {
    pending: Vec<Vote>,
    batch_size: usize,
}

impl Default for VoteBatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteBatcher {
    pub fn new() -> Self {
        Self::with_batch_size(DEFAULT_BATCH_SIZE)
    }

    /// A batch size of zero is treated as one.
    pub fn with_batch_size(batch_size: usize) -> Self {
        VoteBatcher {
            pending: Vec::new(),
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> &[Vote] {
        &self.pending
    }

    /// Stamp and queue `vote`, mining a block into `chain` once the batch is full.
    pub fn submit(
        &mut self,
        chain: &mut Blockchain,
        vote: Vote,
    ) -> Result<SubmitOutcome, ChainError> {
        self.submit_with_limits(chain, vote, &MiningLimits::unbounded())
    }

    /// Like [`VoteBatcher::submit`], with bounded mining. If mining aborts the
    /// call has no effect: the vote is not queued and the buffer is unchanged.
    pub fn submit_with_limits(
        &mut self,
        chain: &mut Blockchain,
        vote: Vote,
        limits: &MiningLimits,
    ) -> Result<SubmitOutcome, ChainError> {
        let vote = vote.stamp();

        if self.pending.len() + 1 < self.batch_size {
            self.pending.push(vote.clone());
            return Ok(SubmitOutcome::Accepted(vote));
        }

        let mut batch = self.pending.clone();
        batch.push(vote);
        let block = chain.append_with_limits(batch, limits)?;
        self.pending.clear();
        Ok(SubmitOutcome::BlockMined(block))
    }
}
