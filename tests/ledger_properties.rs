//! Integration tests for chain integrity, batching and stats

use votechain::blockchain::{codec, Block, Blockchain, GENESIS_HASH};
use votechain::mempool::{SubmitOutcome, VoteBatcher};
use votechain::miner::meets_difficulty;
use votechain::stats::StatsReporter;
use votechain::vote::Vote;

const TEST_DIFFICULTY: usize = 2;

fn ballot(i: usize) -> Vote {
    Vote::new(format!("voter-{}", i), format!("candidate-{}", i % 3), format!("sig-{}", i))
}

/// Chain with three mined blocks holding 1, 2 and 3 votes.
fn build_chain() -> Blockchain {
    let mut chain = Blockchain::new(TEST_DIFFICULTY);
    let mut next = 0;
    for size in 1..=3 {
        let votes = (next..next + size).map(ballot).collect();
        next += size;
        chain.append(votes).expect("append failed");
    }
    chain
}

fn tampered(chain: &Blockchain, edit: impl FnOnce(&mut Vec<Block>)) -> Blockchain {
    let mut blocks = chain.snapshot().to_vec();
    edit(&mut blocks);
    Blockchain::from_blocks(blocks, chain.difficulty()).expect("non-empty chain")
}

#[test]
fn test_appended_blocks_meet_difficulty_and_hash() {
    let chain = build_chain();
    for block in &chain.snapshot()[1..] {
        assert!(meets_difficulty(&block.hash, TEST_DIFFICULTY));
        assert_eq!(block.hash, codec::digest(block));
    }
}

#[test]
fn test_indices_and_links() {
    let chain = build_chain();
    let blocks = chain.snapshot();
    for (i, pair) in blocks.windows(2).enumerate() {
        assert_eq!(pair[0].index, i as u64);
        assert_eq!(pair[1].index, i as u64 + 1);
        assert_eq!(pair[1].prev_hash, pair[0].hash);
    }
}

#[test]
fn test_built_chain_is_valid() {
    assert!(Blockchain::new(TEST_DIFFICULTY).validate());
    assert!(build_chain().validate());
}

#[test]
fn test_single_field_tampering_is_detected() {
    let chain = build_chain();

    for index in 1..chain.len() {
        assert!(!tampered(&chain, |b| b[index].hash = "0".repeat(64)).validate());
        assert!(!tampered(&chain, |b| b[index].prev_hash.push('f')).validate());
        assert!(!tampered(&chain, |b| b[index].nonce += 1).validate());
        assert!(!tampered(&chain, |b| b[index].transactions[0].candidate_id.push('x')).validate());
        assert!(!tampered(&chain, |b| b[index].transactions[0].signature.clear()).validate());
        assert!(!tampered(&chain, |b| {
            b[index].transactions.remove(0);
        })
        .validate());
    }
}

#[test]
fn test_batching_contract() {
    let mut chain = Blockchain::new(TEST_DIFFICULTY);
    let mut batcher = VoteBatcher::new();

    for i in 0..4 {
        match batcher.submit(&mut chain, ballot(i)).unwrap() {
            SubmitOutcome::Accepted(vote) => assert_eq!(vote.voter_id, format!("voter-{}", i)),
            other => panic!("vote {} should be queued, got {:?}", i, other),
        }
    }
    assert_eq!(batcher.pending_count(), 4);

    let block = match batcher.submit(&mut chain, ballot(4)).unwrap() {
        SubmitOutcome::BlockMined(block) => block,
        other => panic!("fifth vote should mine a block, got {:?}", other),
    };
    assert_eq!(block.transactions.len(), 5);
    for (i, vote) in block.transactions.iter().enumerate() {
        assert_eq!(vote.voter_id, format!("voter-{}", i));
    }
    assert_eq!(batcher.pending_count(), 0);
    assert!(chain.validate());
}

#[test]
fn test_report_after_mixed_activity() {
    let mut chain = Blockchain::new(TEST_DIFFICULTY);
    let mut batcher = VoteBatcher::new();

    // 12 votes: two full batches of 5, two left pending.
    for i in 0..12 {
        batcher.submit(&mut chain, ballot(i)).unwrap();
    }
    let stats = StatsReporter::report(&chain, &batcher);
    assert_eq!(stats.total_blocks, 3);
    assert_eq!(stats.total_votes, 10);
    assert_eq!(stats.pending_votes, 2);

    // Direct appends count too.
    chain.append(vec![ballot(100)]).unwrap();
    let stats = StatsReporter::report(&chain, &batcher);
    assert_eq!(stats.total_blocks, 4);
    assert_eq!(stats.total_votes, 11);
}

#[test]
fn test_digest_is_deterministic() {
    let chain = build_chain();
    let block = &chain.snapshot()[2];
    let digests: Vec<String> = (0..5).map(|_| codec::digest(block)).collect();
    assert!(digests.iter().all(|d| d == &block.hash));
}

#[test]
fn test_genesis_is_fixed_and_unmined() {
    let chain = build_chain();
    let genesis = &chain.snapshot()[0];
    assert_eq!(genesis.index, 0);
    assert!(genesis.transactions.is_empty());
    assert_eq!(genesis.prev_hash, GENESIS_HASH);
    assert_eq!(genesis.hash, GENESIS_HASH);
    assert_eq!(genesis.nonce, 0);
    assert_ne!(genesis.hash, codec::digest(genesis));
}
