//! Proof-of-work search.
//!
//! A block is accepted when its hex digest starts with `difficulty` `'0'`
//! characters. The search starts at nonce 0 and increments by one. The
//! plain [`mine_block`] has no upper bound; [`mine_block_with_limits`] adds an
//! optional iteration cap, deadline and cancellation flag without changing
//! what a successful result looks like.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::blockchain::Block;
use crate::error::ChainError;

/// Default number of leading hex zeros (`"0000"`).
pub const DEFAULT_DIFFICULTY: usize = 4;

/// Upper bound for difficulty: a SHA-256 hex digest has 64 characters.
pub const MAX_DIFFICULTY: usize = 64;

// Deadline and cancel flag are polled every this many hashes.
const LIMIT_CHECK_INTERVAL: u64 = 1024;

/// Prefix a hash must start with at the given difficulty.
pub fn required_prefix(difficulty: usize) -> String {
    "0".repeat(difficulty)
}

pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}

/// Optional bounds on a mining run. The default is unbounded.
#[derive(Debug, Clone, Default)]
pub struct MiningLimits {
    pub max_iterations: Option<u64>,
    pub deadline: Option<Instant>,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl MiningLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// A timeout too large to represent as an `Instant` means no deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Abort as soon as `flag` is set to `true`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    fn is_expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }
}

/// Search for a nonce with no iteration bound and return the sealed block.
pub fn mine_block(mut block: Block, difficulty: usize) -> Block {
    block.nonce = 0;
    loop {
        let hash = block.calculate_hash();
        if meets_difficulty(&hash, difficulty) {
            block.hash = hash;
            return block;
        }
        block.nonce += 1;
    }
}

/// Bounded variant of [`mine_block`].
pub fn mine_block_with_limits(
    mut block: Block,
    difficulty: usize,
    limits: &MiningLimits,
) -> Result<Block, ChainError> {
    block.nonce = 0;
    let mut attempts: u64 = 0;

    loop {
        if let Some(max) = limits.max_iterations {
            if attempts >= max {
                return Err(ChainError::MiningAborted(format!(
                    "no valid nonce within {} attempts",
                    max
                )));
            }
        }

        if attempts % LIMIT_CHECK_INTERVAL == 0 {
            if limits.is_cancelled() {
                return Err(ChainError::MiningAborted("cancelled".to_string()));
            }
            if limits.is_expired() {
                return Err(ChainError::MiningAborted(format!(
                    "deadline passed after {} attempts",
                    attempts
                )));
            }
        }

        let hash = block.calculate_hash();
        if meets_difficulty(&hash, difficulty) {
            block.hash = hash;
            return Ok(block);
        }

        attempts += 1;
        block.nonce = block
            .nonce
            .checked_add(1)
            .ok_or_else(|| ChainError::MiningAborted("nonce space exhausted".to_string()))?;
    }
}
