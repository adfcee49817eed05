/// Vote types for Votechain
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single ballot as recorded on the chain.
///
/// The `signature` is carried as an opaque string. The ledger never
/// inspects or verifies it; callers are trusted to have done so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub voter_id: String,
    pub candidate_id: String,
    pub timestamp: DateTime<Utc>,
    pub signature: String,
}

impl Vote {
    /// Create a vote stamped with the current time.
    pub fn new(
        voter_id: impl Into<String>,
        candidate_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Vote {
            voter_id: voter_id.into(),
            candidate_id: candidate_id.into(),
            timestamp: Utc::now(),
            signature: signature.into(),
        }
    }

    /// Replace the timestamp with the current time.
    pub fn stamp(mut self) -> Self {
        self.timestamp = Utc::now();
        self
    }

    /// Canonical textual form used as hash input: `{voter candidate timestamp signature}`.
    pub fn canonical_string(&self) -> String {
        format!(
            "{{{} {} {} {}}}",
            self.voter_id,
            self.candidate_id,
            canonical_timestamp(&self.timestamp),
            self.signature
        )
    }
}

/// RFC 3339 in UTC with nanosecond precision. Changing this changes every block hash.
pub fn canonical_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
