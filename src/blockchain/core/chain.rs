use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::blockchain::core::codec;
use crate::blockchain::core::validation::validate_chain;
use crate::error::ChainError;
use crate::miner::{mine_block, mine_block_with_limits, MiningLimits, DEFAULT_DIFFICULTY};
use crate::vote::Vote;

/// Placeholder used for both the genesis block's hash and its `prev_hash`.
pub const GENESIS_HASH: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: DateTime<Utc>,
    pub transactions: Vec<Vote>,
    pub hash: String,
    pub prev_hash: String,
    pub nonce: u64,
}

impl Block {
    /// Unmined candidate block: nonce 0 and no hash yet.
    pub fn new(index: u64, prev_hash: String, transactions: Vec<Vote>) -> Self {
        Block {
            index,
            timestamp: Utc::now(),
            transactions,
            hash: String::new(),
            prev_hash,
            nonce: 0,
        }
    }

    /// The genesis block. Its hash is a fixed placeholder and it is never mined.
    pub fn genesis() -> Self {
        Block {
            index: 0,
            timestamp: Utc::now(),
            transactions: Vec::new(),
            hash: GENESIS_HASH.to_string(),
            prev_hash: GENESIS_HASH.to_string(),
            nonce: 0,
        }
    }

    pub fn calculate_hash(&self) -> String {
        codec::digest(self)
    }
}

/// Append-only chain of vote blocks.
///
/// Always holds at least the genesis block. Blocks are only added through
/// [`Blockchain::append`], which mines them before insertion.
#[derive(Debug, Clone)]
pub struct Blockchain {
    blocks: Vec<Block>,
    difficulty: usize,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl Blockchain {
    /// Create a chain holding only the genesis block.
    pub fn new(difficulty: usize) -> Self {
        let genesis = Block::genesis();
        info!(difficulty, "Created genesis block");
        Blockchain {
            blocks: vec![genesis],
            difficulty,
        }
    }

    /// Rebuild a chain from existing blocks without checking them; use
    /// [`Blockchain::validate`] to audit the result.
    pub fn from_blocks(blocks: Vec<Block>, difficulty: usize) -> Result<Self, ChainError> {
        if blocks.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(Blockchain { blocks, difficulty })
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Read-only view of every block in chain order.
    pub fn snapshot(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of votes committed across all blocks.
    pub fn total_votes(&self) -> usize {
        self.blocks.iter().map(|b| b.transactions.len()).sum()
    }

    /// Mine a block holding `votes` and link it onto the tip.
    ///
    /// Mining has no iteration bound; see [`Blockchain::append_with_limits`].
    pub fn append(&mut self, votes: Vec<Vote>) -> Result<Block, ChainError> {
        let candidate = self.next_candidate(votes)?;
        let start = Instant::now();
        let mined = mine_block(candidate, self.difficulty);
        Ok(self.commit(mined, start))
    }

    /// Like [`Blockchain::append`], but gives up when `limits` fire.
    /// Nothing is appended on failure.
    pub fn append_with_limits(
        &mut self,
        votes: Vec<Vote>,
        limits: &MiningLimits,
    ) -> Result<Block, ChainError> {
        let candidate = self.next_candidate(votes)?;
        let start = Instant::now();
        let mined = mine_block_with_limits(candidate, self.difficulty, limits)?;
        Ok(self.commit(mined, start))
    }

    /// True when every non-genesis block hashes correctly and links to its predecessor.
    pub fn validate(&self) -> bool {
        self.validate_detailed().is_ok()
    }

    /// Same scan as [`Blockchain::validate`], reporting the first failure.
    pub fn validate_detailed(&self) -> Result<(), ChainError> {
        validate_chain(&self.blocks)
    }

    fn next_candidate(&self, votes: Vec<Vote>) -> Result<Block, ChainError> {
        let last = self.blocks.last().ok_or(ChainError::EmptyChain)?;
        Ok(Block::new(last.index + 1, last.hash.clone(), votes))
    }

    fn commit(&mut self, block: Block, started: Instant) -> Block {
        info!(
            index = block.index,
            nonce = block.nonce,
            votes = block.transactions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Mined new block"
        );
        debug!(hash = %block.hash, prev_hash = %block.prev_hash, "Block linked");
        self.blocks.push(block.clone());
        block
    }
}
