//! Error types for Votechain

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The chain has no blocks. Only reachable if genesis was never created.
    EmptyChain,
    InvalidVote(String),
    InvalidBlock(String),
    InvalidBlockLinkage(String),
    MiningAborted(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::EmptyChain => write!(f, "Chain is empty; genesis block missing"),
            ChainError::InvalidVote(msg) => write!(f, "Invalid vote: {}", msg),
            ChainError::InvalidBlock(msg) => write!(f, "Invalid block: {}", msg),
            ChainError::InvalidBlockLinkage(msg) => write!(f, "Invalid block linkage: {}", msg),
            ChainError::MiningAborted(msg) => write!(f, "Mining aborted: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}
