//! Repository for the `votes` table: the vote ledger.

use sqlx::PgPool;
use stackit_core::types::DbId;
use stackit_core::voting::{VoteDirection, VoteTally, VoteTransition};

use crate::models::vote::{VoteOutcome, VoteWithVoter};

/// Column list, qualified with the `v` alias.
const COLUMNS: &str = "v.id, v.user_id, v.answer_id, v.vote, v.created_at";

pub struct VoteRepo;

impl VoteRepo {
    /// Cast `direction` on an answer on behalf of `voter_id`.
    ///
    /// The answer row is locked for the duration of the transaction, so
    /// concurrent votes on the same answer apply one after another and the
    /// counters never lose an update. The vote-row mutation and the counter
    /// update commit together.
    ///
    /// Returns `None` if the answer does not exist. A concurrent duplicate
    /// insert surfaces as a unique violation on `uq_votes_user_answer`.
    pub async fn cast(
        pool: &PgPool,
        voter_id: DbId,
        answer_id: DbId,
        direction: VoteDirection,
    ) -> Result<Option<VoteOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM answers WHERE id = $1 FOR UPDATE")
                .bind(answer_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let existing: Option<i16> =
            sqlx::query_scalar("SELECT vote FROM votes WHERE user_id = $1 AND answer_id = $2")
                .bind(voter_id)
                .bind(answer_id)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing
            .map(|v| VoteDirection::from_value(i64::from(v)))
            .transpose()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        let transition = VoteTransition::resolve(existing, direction);
        match transition {
            VoteTransition::Cast(dir) => {
                sqlx::query("INSERT INTO votes (user_id, answer_id, vote) VALUES ($1, $2, $3)")
                    .bind(voter_id)
                    .bind(answer_id)
                    .bind(dir.value())
                    .execute(&mut *tx)
                    .await?;
            }
            VoteTransition::Retract(_) => {
                sqlx::query("DELETE FROM votes WHERE user_id = $1 AND answer_id = $2")
                    .bind(voter_id)
                    .bind(answer_id)
                    .execute(&mut *tx)
                    .await?;
            }
            VoteTransition::Flip { to, .. } => {
                sqlx::query("UPDATE votes SET vote = $3 WHERE user_id = $1 AND answer_id = $2")
                    .bind(voter_id)
                    .bind(answer_id)
                    .bind(to.value())
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let delta = transition.deltas();
        let (upvotes, downvotes): (i32, i32) = sqlx::query_as(
            "UPDATE answers
             SET upvotes = upvotes + $2, downvotes = downvotes + $3
             WHERE id = $1
             RETURNING upvotes, downvotes",
        )
        .bind(answer_id)
        .bind(delta.upvotes)
        .bind(delta.downvotes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(VoteOutcome {
            transition,
            tally: VoteTally::new(upvotes, downvotes),
        }))
    }

    /// All votes on an answer with voter usernames, oldest first.
    pub async fn list_for_answer(
        pool: &PgPool,
        answer_id: DbId,
    ) -> Result<Vec<VoteWithVoter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.username
             FROM votes v
             JOIN users u ON u.id = v.user_id
             WHERE v.answer_id = $1
             ORDER BY v.created_at, v.id"
        );
        sqlx::query_as::<_, VoteWithVoter>(&query)
            .bind(answer_id)
            .fetch_all(pool)
            .await
    }
}
