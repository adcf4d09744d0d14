//! Aggregate queries backing the admin dashboard.

use sqlx::PgPool;

use crate::models::stats::PlatformStats;

pub struct StatsRepo;

impl StatsRepo {
    /// Counts of users, content and bans, plus questions asked in the last
    /// seven days.
    pub async fn platform_stats(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
        sqlx::query_as::<_, PlatformStats>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM questions) AS total_questions,
                (SELECT COUNT(*) FROM answers) AS total_answers,
                (SELECT COUNT(*) FROM users WHERE is_banned) AS banned_users,
                (SELECT COUNT(*) FROM questions
                  WHERE created_at >= NOW() - INTERVAL '7 days') AS questions_this_week",
        )
        .fetch_one(pool)
        .await
    }
}
