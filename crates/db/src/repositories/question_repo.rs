//! Repository for the `questions` table.

use sqlx::PgPool;
use stackit_core::types::DbId;

use crate::models::question::{
    CreateQuestion, Question, QuestionSummary, QuestionWithAuthor, UpdateQuestion,
};

/// Column list, qualified with the `q` alias used by every query here.
const COLUMNS: &str = "q.id, q.user_id, q.title, q.description, q.tags, q.accepted_answer_id, \
                       q.created_at, q.updated_at";

/// Provides CRUD and acceptance operations for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions AS q (user_id, title, description, tags)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions q WHERE q.id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a question together with its author's username.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QuestionWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.username AS author_username
             FROM questions q
             JOIN users u ON u.id = q.user_id
             WHERE q.id = $1"
        );
        sqlx::query_as::<_, QuestionWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of questions, newest first, with answer counts.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<QuestionSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.username AS author_username,
                    (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id) AS answer_count
             FROM questions q
             JOIN users u ON u.id = q.user_id
             ORDER BY q.created_at DESC, q.id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, QuestionSummary>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(pool)
            .await
    }

    /// Questions carrying any of `tags`, newest first.
    pub async fn search_by_tags(
        pool: &PgPool,
        tags: &[String],
    ) -> Result<Vec<QuestionSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.username AS author_username,
                    (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id) AS answer_count
             FROM questions q
             JOIN users u ON u.id = q.user_id
             WHERE q.tags && $1
             ORDER BY q.created_at DESC, q.id DESC"
        );
        sqlx::query_as::<_, QuestionSummary>(&query)
            .bind(tags)
            .fetch_all(pool)
            .await
    }

    /// Most recently asked questions with their authors.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<QuestionWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.username AS author_username
             FROM questions q
             JOIN users u ON u.id = q.user_id
             ORDER BY q.created_at DESC, q.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, QuestionWithAuthor>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a question. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuestion,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions q SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                tags = COALESCE($4, tags),
                updated_at = NOW()
             WHERE q.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Point the question's accepted answer at `answer_id`.
    ///
    /// The composite foreign key rejects answers of other questions, so
    /// callers must check ownership of the answer first to report a 404
    /// instead of a constraint error.
    pub async fn set_accepted_answer(
        pool: &PgPool,
        question_id: DbId,
        answer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE questions SET accepted_answer_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(question_id)
        .bind(answer_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a question with its answers and their votes.
    ///
    /// Runs in a single transaction. Returns `false` if the question did not
    /// exist, in which case nothing is changed.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM questions WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        let votes = sqlx::query(
            "DELETE FROM votes WHERE answer_id IN (SELECT id FROM answers WHERE question_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE questions SET accepted_answer_id = NULL WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let answers = sqlx::query("DELETE FROM answers WHERE question_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            question_id = id,
            answers = answers.rows_affected(),
            votes = votes.rows_affected(),
            "Question deleted with dependents"
        );
        Ok(true)
    }
}
