//! Repository for the `answers` table.

use sqlx::PgPool;
use stackit_core::notifications::NewNotification;
use stackit_core::types::DbId;

use crate::models::answer::{Answer, AnswerWithAuthor, CreateAnswer, RecentAnswer};
use crate::repositories::NotificationRepo;

/// Column list, qualified with the `a` alias. `total_votes` is derived here
/// and nowhere else.
const COLUMNS: &str = "a.id, a.question_id, a.user_id, a.content, a.upvotes, a.downvotes, \
                       (a.upvotes - a.downvotes) AS total_votes, a.created_at, a.updated_at";

/// Provides lifecycle operations for answers.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert an answer with zero vote counters.
    ///
    /// When `notification` is given it is inserted in the same transaction,
    /// so an answer never exists without the owner being told about it.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnswer,
        notification: Option<&NewNotification>,
    ) -> Result<Answer, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO answers AS a (question_id, user_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let answer = sqlx::query_as::<_, Answer>(&query)
            .bind(input.question_id)
            .bind(input.user_id)
            .bind(&input.content)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(n) = notification {
            NotificationRepo::create(&mut *tx, n).await?;
        }

        tx.commit().await?;
        Ok(answer)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers a WHERE a.id = $1");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an answer together with its author's username.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AnswerWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.username AS author_username
             FROM answers a
             JOIN users u ON u.id = a.user_id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, AnswerWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All answers of a question, best-voted first, then newest.
    pub async fn list_for_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<AnswerWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.username AS author_username
             FROM answers a
             JOIN users u ON u.id = a.user_id
             WHERE a.question_id = $1
             ORDER BY total_votes DESC, a.created_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, AnswerWithAuthor>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    /// Most recent answers with author and question title.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<RecentAnswer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.username AS author_username, q.title AS question_title
             FROM answers a
             JOIN users u ON u.id = a.user_id
             JOIN questions q ON q.id = a.question_id
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, RecentAnswer>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replace the content of an answer. Vote counters are not touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!(
            "UPDATE answers a SET content = $2, updated_at = NOW()
             WHERE a.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete an answer, its votes, and any acceptance pointing at it.
    ///
    /// All three effects happen in one transaction. Returns `false` if the
    /// answer did not exist.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM answers WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        let votes = sqlx::query("DELETE FROM votes WHERE answer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let unaccepted = sqlx::query(
            "UPDATE questions SET accepted_answer_id = NULL WHERE accepted_answer_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            answer_id = id,
            votes = votes.rows_affected(),
            was_accepted = unaccepted.rows_affected() > 0,
            "Answer deleted with dependents"
        );
        Ok(true)
    }
}
