//! Votechain - an append-only, proof-of-work ledger of votes
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Blocks, hashing, chain append and integrity validation
//! - [`vote`] - Vote type and input validation
//! - [`mempool`] - Pending vote buffer and batching policy
//! - [`ledger`] - Chain + buffer aggregate shared behind one lock
//! - [`stats`] - Aggregate counters
//!
//! ## Consensus
//! - [`miner`] - Proof-of-work mining
//!
//! ## Integration
//! - `api` - HTTP endpoints (feature `api`)
//! - [`node`] - Process startup and logging
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! Vote signatures are carried as opaque strings and never verified.

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod ledger;
pub mod mempool;
pub mod stats;
pub mod vote;

// ============================================================================
// Consensus & Mining
// ============================================================================
pub mod miner;

// ============================================================================
// Integration
// ============================================================================
#[cfg(feature = "api")]
pub mod api;
pub mod node;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
