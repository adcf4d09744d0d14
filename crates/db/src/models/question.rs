//! Question entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stackit_core::types::{DbId, Timestamp};

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub accepted_answer_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A question joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub question: Question,
    pub author_username: String,
}

/// A question as shown in listings: author plus number of answers.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub question: Question,
    pub author_username: String,
    pub answer_count: i64,
}

/// DTO for creating a question. Tags are expected to be normalized.
#[derive(Debug)]
pub struct CreateQuestion {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// DTO for editing a question. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateQuestion {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}
