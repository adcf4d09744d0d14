//! Aggregate counters for the admin dashboard.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_questions: i64,
    pub total_answers: i64,
    pub banned_users: i64,
    pub questions_this_week: i64,
}
