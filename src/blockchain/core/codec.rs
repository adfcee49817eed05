//! Canonical block encoding and digest.
//!
//! The hash input is the plain concatenation of
//! `index ‖ timestamp ‖ transactions ‖ prev_hash ‖ nonce`, with no
//! separators between fields. Timestamps use [`canonical_timestamp`] and the
//! transaction list is rendered as `[{vote} {vote} ...]` via
//! [`Vote::canonical_string`]. This encoding is fixed: altering it
//! invalidates every existing block hash.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::blockchain::core::chain::Block;
use crate::vote::{canonical_timestamp, Vote};

/// Render a transaction list in its canonical form.
pub fn canonical_transactions(transactions: &[Vote]) -> String {
    let votes: Vec<String> = transactions.iter().map(Vote::canonical_string).collect();
    format!("[{}]", votes.join(" "))
}

/// Build the canonical byte string hashed for a block. The `hash` field is never included.
pub fn canonical_bytes(
    index: u64,
    timestamp: &DateTime<Utc>,
    transactions: &[Vote],
    prev_hash: &str,
    nonce: u64,
) -> Vec<u8> {
    format!(
        "{}{}{}{}{}",
        index,
        canonical_timestamp(timestamp),
        canonical_transactions(transactions),
        prev_hash,
        nonce
    )
    .into_bytes()
}

/// Lowercase hex SHA-256 of the block's canonical content.
pub fn digest(block: &Block) -> String {
    let record = canonical_bytes(
        block.index,
        &block.timestamp,
        &block.transactions,
        &block.prev_hash,
        block.nonce,
    );
    let mut hasher = Sha256::new();
    hasher.update(&record);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_block() -> Block {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Block {
            index: 3,
            timestamp: ts,
            transactions: vec![
                Vote {
                    voter_id: "v1".to_string(),
                    candidate_id: "c1".to_string(),
                    timestamp: ts,
                    signature: "s1".to_string(),
                },
                Vote {
                    voter_id: "v2".to_string(),
                    candidate_id: "c2".to_string(),
                    timestamp: ts,
                    signature: "s2".to_string(),
                },
            ],
            hash: String::new(),
            prev_hash: "abc".to_string(),
            nonce: 42,
        }
    }

    #[test]
    fn test_canonical_bytes_layout() {
        let block = sample_block();
        let bytes = canonical_bytes(
            block.index,
            &block.timestamp,
            &block.transactions,
            &block.prev_hash,
            block.nonce,
        );
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "32024-01-01T00:00:00.000000000Z\
             [{v1 c1 2024-01-01T00:00:00.000000000Z s1} {v2 c2 2024-01-01T00:00:00.000000000Z s2}]\
             abc42"
        );
    }

    #[test]
    fn test_empty_transactions_render_as_brackets() {
        assert_eq!(canonical_transactions(&[]), "[]");
    }

    #[test]
    fn test_digest_is_deterministic_lowercase_hex() {
        let block = sample_block();
        let first = digest(&block);
        let second = digest(&block.clone());
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_digest_ignores_hash_field() {
        let block = sample_block();
        let mut with_hash = block.clone();
        with_hash.hash = "ffff".to_string();
        assert_eq!(digest(&block), digest(&with_hash));
    }

    #[test]
    fn test_digest_changes_with_each_field() {
        let base = sample_block();
        let base_digest = digest(&base);

        let mut b = base.clone();
        b.index += 1;
        assert_ne!(digest(&b), base_digest);

        let mut b = base.clone();
        b.nonce += 1;
        assert_ne!(digest(&b), base_digest);

        let mut b = base.clone();
        b.prev_hash.push('0');
        assert_ne!(digest(&b), base_digest);

        let mut b = base.clone();
        b.timestamp = b.timestamp + chrono::Duration::nanoseconds(1);
        assert_ne!(digest(&b), base_digest);

        let mut b = base;
        b.transactions[1].candidate_id = "c1".to_string();
        assert_ne!(digest(&b), base_digest);
    }
}
