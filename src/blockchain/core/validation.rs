use crate::blockchain::core::chain::Block;
use crate::error::ChainError;

/// Walk the chain from index 1 and stop at the first block whose stored hash
/// does not match its recomputed digest or whose `prev_hash` does not match
/// the predecessor's stored hash. The genesis block is not checked.
pub fn validate_chain(blocks: &[Block]) -> Result<(), ChainError> {
    for pair in blocks.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);

        let expected = current.calculate_hash();
        if current.hash != expected {
            return Err(ChainError::InvalidBlock(format!(
                "Hash mismatch at index {}. Expected {}, but got {}.",
                current.index, expected, current.hash
            )));
        }

        if current.prev_hash != prev.hash {
            return Err(ChainError::InvalidBlockLinkage(format!(
                "Block {} points to {}, but previous block hash is {}.",
                current.index, current.prev_hash, prev.hash
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Blockchain;
    use crate::vote::Vote;

    fn grown_chain() -> Vec<Block> {
        let mut chain = Blockchain::new(1);
        chain
            .append(vec![Vote::new("a", "x", "s1"), Vote::new("b", "y", "s2")])
            .unwrap();
        chain.append(vec![Vote::new("c", "x", "s3")]).unwrap();
        chain.snapshot().to_vec()
    }

    #[test]
    fn test_genesis_only_is_valid() {
        let chain = Blockchain::new(1);
        assert!(validate_chain(chain.snapshot()).is_ok());
    }

    #[test]
    fn test_hash_mismatch_reported() {
        let mut blocks = grown_chain();
        blocks[1].nonce += 1;
        let err = validate_chain(&blocks).unwrap_err();
        assert!(matches!(err, ChainError::InvalidBlock(msg) if msg.contains("index 1")));
    }

    #[test]
    fn test_broken_link_reported() {
        let mut blocks = grown_chain();
        // Re-hash after changing prev_hash so only the linkage check can fail.
        blocks[2].prev_hash = "deadbeef".to_string();
        blocks[2].hash = blocks[2].calculate_hash();
        let err = validate_chain(&blocks).unwrap_err();
        assert!(matches!(err, ChainError::InvalidBlockLinkage(_)));
    }

    #[test]
    fn test_genesis_tampering_is_not_detected() {
        let mut blocks = grown_chain();
        blocks[0].transactions.push(Vote::new("z", "z", "z"));
        assert!(validate_chain(&blocks).is_ok());
    }
}
