//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever see
//! the caller's own notifications.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use stackit_core::error::CoreError;
use stackit_core::pagination::{offset_for, PageInfo};
use stackit_core::types::DbId;
use stackit_db::models::notification::Notification;
use stackit_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub pagination: PageInfo,
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

/// GET /api/v1/notifications
///
/// One page of the caller's notifications, newest first, with the unread
/// count.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<NotificationListResponse>> {
    let (page, limit) = params.resolve(DEFAULT_LIMIT, MAX_LIMIT);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        limit,
        offset_for(page, limit),
    )
    .await?;
    let total = NotificationRepo::count_for_user(&state.pool, auth.user_id).await?;
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(NotificationListResponse {
        notifications,
        pagination: PageInfo::new(page, limit, total),
        unread_count,
    }))
}

/// PUT /api/v1/notifications/{id}/read
///
/// Mark a single notification as read. 404 if it does not belong to the
/// caller.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(notification_id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::not_found(
            "Notification",
            notification_id,
        )));
    }

    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// PUT /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    tracing::debug!(user_id = auth.user_id, count, "Notifications marked read");

    Ok(Json(MessageResponse::new("All notifications marked as read")))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(notification_id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = NotificationRepo::delete(&state.pool, notification_id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::not_found(
            "Notification",
            notification_id,
        )));
    }

    Ok(Json(MessageResponse::new("Notification deleted")))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UnreadCountResponse>> {
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}
