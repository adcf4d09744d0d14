//! Vote entity model.

use serde::Serialize;
use sqlx::FromRow;
use stackit_core::types::{DbId, Timestamp};
use stackit_core::voting::{VoteTally, VoteTransition};

/// A row from the `votes` table. `vote` is `1` or `-1`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: DbId,
    pub user_id: DbId,
    pub answer_id: DbId,
    pub vote: i16,
    pub created_at: Timestamp,
}

/// A vote joined with the voter's username.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteWithVoter {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vote: Vote,
    pub username: String,
}

/// Result of casting a vote: what happened and the answer's new counters.
#[derive(Debug, Clone, Copy)]
pub struct VoteOutcome {
    pub transition: VoteTransition,
    pub tally: VoteTally,
}
