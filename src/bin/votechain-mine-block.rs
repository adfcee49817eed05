#![forbid(unsafe_code)]
//! Mine a single block of sample votes and print the result.

use clap::Parser;
use colored::*;
use std::time::{Duration, Instant};
use votechain::blockchain::Blockchain;
use votechain::miner::{required_prefix, MiningLimits, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
use votechain::vote::Vote;

#[derive(Parser, Debug)]
#[command(name = "votechain-mine-block", about = "Mine one block of sample votes")]
struct Args {
    /// Required leading hex zeros
    #[arg(short, long, default_value_t = DEFAULT_DIFFICULTY)]
    difficulty: usize,

    /// Number of sample votes in the block
    #[arg(short, long, default_value_t = 5)]
    votes: usize,

    /// Give up after this many seconds
    #[arg(short, long)]
    timeout_secs: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.difficulty > MAX_DIFFICULTY {
        return Err(format!("difficulty must be at most {}", MAX_DIFFICULTY).into());
    }

    let mut chain = Blockchain::new(args.difficulty);
    let votes: Vec<Vote> = (0..args.votes)
        .map(|i| Vote::new(format!("voter-{}", i), format!("candidate-{}", i % 2), "unsigned"))
        .collect();

    let limits = match args.timeout_secs {
        Some(secs) => MiningLimits::default().with_timeout(Duration::from_secs(secs)),
        None => MiningLimits::unbounded(),
    };

    println!(
        "{} {} votes, target prefix {}",
        "Mining".bright_cyan().bold(),
        args.votes,
        required_prefix(args.difficulty).yellow()
    );

    let start = Instant::now();
    let block = chain.append_with_limits(votes, &limits)?;
    let elapsed = start.elapsed();

    println!("{}", "Block mined".bright_green().bold());
    println!("  Index:       {}", block.index);
    println!("  Hash:        {}", block.hash.bright_white());
    println!("  Previous:    {}", block.prev_hash);
    println!("  Nonce:       {}", block.nonce);
    println!("  Timestamp:   {}", block.timestamp.to_rfc3339());
    println!("  Votes:       {}", block.transactions.len());
    println!("  Mining time: {:.3} seconds", elapsed.as_secs_f64());
    println!(
        "  Chain valid: {}",
        if chain.validate() { "yes".green() } else { "no".red() }
    );

    Ok(())
}
