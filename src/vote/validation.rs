/// Boundary validation for incoming votes, separated from type definitions
use serde::Deserialize;

use crate::error::ChainError;
use crate::vote::types::Vote;

/// Maximum length in bytes of a voter or candidate identifier
pub const MAX_ID_LENGTH: usize = 256;

/// Maximum length in bytes of the opaque signature string
pub const MAX_SIGNATURE_LENGTH: usize = 4096;

/// Vote as submitted by a client, before it is accepted.
///
/// Fields are optional here so that a missing field yields a descriptive
/// `InvalidVote` instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub voter_id: Option<String>,
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

impl VoteRequest {
    pub fn new(voter_id: &str, candidate_id: &str, signature: &str) -> Self {
        VoteRequest {
            voter_id: Some(voter_id.to_string()),
            candidate_id: Some(candidate_id.to_string()),
            signature: Some(signature.to_string()),
        }
    }

    /// Check required fields and turn the request into a timestamped `Vote`.
    pub fn into_vote(self) -> Result<Vote, ChainError> {
        let voter_id = required_field("voterId", self.voter_id, MAX_ID_LENGTH)?;
        let candidate_id = required_field("candidateId", self.candidate_id, MAX_ID_LENGTH)?;
        let signature = required_field("signature", self.signature, MAX_SIGNATURE_LENGTH)?;
        Ok(Vote::new(voter_id, candidate_id, signature))
    }
}

fn required_field(name: &str, value: Option<String>, max_len: usize) -> Result<String, ChainError> {
    let value = value.ok_or_else(|| ChainError::InvalidVote(format!("{} is required", name)))?;

    if value.trim().is_empty() {
        return Err(ChainError::InvalidVote(format!("{} must not be empty", name)));
    }

    if value.len() > max_len {
        return Err(ChainError::InvalidVote(format!(
            "{} too long: {} bytes (max: {})",
            name,
            value.len(),
            max_len
        )));
    }

    Ok(value)
}
