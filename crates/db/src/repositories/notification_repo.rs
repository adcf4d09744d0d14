//! Repository for the `notifications` table.

use sqlx::{PgConnection, PgPool};
use stackit_core::notifications::{NewNotification, NotificationKind};
use stackit_core::types::DbId;

use crate::models::notification::Notification;

/// Every column of a `notifications` row, in model order.
const COLUMNS: &str = "id, user_id, kind, message, link, is_read, created_at";

/// Per-user inbox queries and the announcement fan-out.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert one notification on an open connection or transaction,
    /// returning the generated ID.
    pub async fn create(conn: &mut PgConnection, n: &NewNotification) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (user_id, kind, message, link) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(n.recipient_id)
        .bind(n.kind.as_str())
        .bind(&n.message)
        .bind(&n.link)
        .fetch_one(conn)
        .await
    }

    /// Insert the same notification for every non-banned user.
    ///
    /// A single `INSERT ... SELECT` statement, so either every recipient
    /// gets it or none does. Returns the number of recipients.
    pub async fn broadcast(
        pool: &PgPool,
        kind: NotificationKind,
        message: &str,
        link: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, kind, message, link) \
             SELECT id, $1, $2, $3 FROM users WHERE is_banned = false",
        )
        .bind(kind.as_str())
        .bind(message)
        .bind(link)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// One page of a user's notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification exists and belongs to the given
    /// user, whether or not it was already read.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true \
             WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a notification owned by `user_id`. Returns `false` if there
    /// was no such notification.
    pub async fn delete(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(notification_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
