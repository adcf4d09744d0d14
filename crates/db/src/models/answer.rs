//! Answer entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stackit_core::types::{DbId, Timestamp};

/// A row from the `answers` table.
///
/// `total_votes` is computed in the SELECT list as `upvotes - downvotes`;
/// the table has no such column.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub total_votes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An answer joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub answer: Answer,
    pub author_username: String,
}

/// An answer as shown in the admin activity feed.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAnswer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub answer: Answer,
    pub author_username: String,
    pub question_title: String,
}

/// DTO for creating an answer.
#[derive(Debug)]
pub struct CreateAnswer {
    pub question_id: DbId,
    pub user_id: DbId,
    pub content: String,
}
