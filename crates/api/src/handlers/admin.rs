//! Handlers for the `/admin` resource.
//!
//! Every endpoint requires the `admin` role via [`RequireAdmin`].

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use stackit_core::error::CoreError;
use stackit_core::notifications::{announcement_message, NotificationKind};
use stackit_core::pagination::{clamp_limit, offset_for, PageInfo};
use stackit_core::roles::Role;
use stackit_core::types::DbId;
use stackit_core::validation::require_text;
use stackit_db::models::answer::RecentAnswer;
use stackit_db::models::question::QuestionWithAuthor;
use stackit_db::models::stats::PlatformStats;
use stackit_db::models::user::UserResponse;
use stackit_db::repositories::{
    AnswerRepo, NotificationRepo, QuestionRepo, StatsRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::answer::remove_answer;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{LimitParams, PageParams};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Default page size for the user listing.
const DEFAULT_USER_LIMIT: i64 = 20;

/// Default number of entries per activity feed.
const DEFAULT_ACTIVITY_LIMIT: i64 = 50;

/// Maximum page size for admin listings.
const MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/users/{id}/ban`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRequest {
    pub is_banned: Option<bool>,
}

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: Option<String>,
}

/// Request body for `POST /admin/announcements`.
#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    pub message: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize)]
pub struct UserUpdateResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementResponse {
    pub message: &'static str,
    pub recipients: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub recent_questions: Vec<QuestionWithAuthor>,
    pub recent_answers: Vec<RecentAnswer>,
    pub recent_users: Vec<UserResponse>,
}

// ---------------------------------------------------------------------------
// Platform overview
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<PlatformStats>> {
    let stats = StatsRepo::platform_stats(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/v1/admin/activity
///
/// Latest questions, answers and sign-ups.
pub async fn activity(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> AppResult<Json<ActivityResponse>> {
    let limit = clamp_limit(params.limit, DEFAULT_ACTIVITY_LIMIT, MAX_LIMIT);

    let recent_questions = QuestionRepo::list_recent(&state.pool, limit).await?;
    let recent_answers = AnswerRepo::list_recent(&state.pool, limit).await?;
    let recent_users = UserRepo::list(&state.pool, limit, 0)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(ActivityResponse {
        recent_questions,
        recent_answers,
        recent_users,
    }))
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<UserListResponse>> {
    let (page, limit) = params.resolve(DEFAULT_USER_LIMIT, MAX_LIMIT);

    let users = UserRepo::list(&state.pool, limit, offset_for(page, limit))
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    let total = UserRepo::count(&state.pool).await?;

    Ok(Json(UserListResponse {
        users,
        pagination: PageInfo::new(page, limit, total),
    }))
}

/// PUT /api/v1/admin/users/{id}/ban
///
/// Ban or unban a user. Admins cannot ban themselves.
pub async fn set_ban(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
    AppJson(input): AppJson<BanRequest>,
) -> AppResult<Json<UserUpdateResponse>> {
    let is_banned = input
        .is_banned
        .ok_or_else(|| AppError::BadRequest("isBanned must be a boolean".into()))?;

    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::not_found("User", user_id)));
    }
    if user_id == admin.user_id {
        return Err(AppError::BadRequest("Cannot ban yourself".into()));
    }

    let user = UserRepo::set_banned(&state.pool, user_id, is_banned)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", user_id)))?;

    tracing::info!(user_id, admin_id = admin.user_id, is_banned, "User ban status changed");

    Ok(Json(UserUpdateResponse {
        message: if is_banned {
            "User banned successfully"
        } else {
            "User unbanned successfully"
        },
        user: user.into(),
    }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Change a user's role. Admins cannot change their own role.
pub async fn set_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
    AppJson(input): AppJson<RoleRequest>,
) -> AppResult<Json<UserUpdateResponse>> {
    let role: Role = require_text("Role", input.role.as_deref())?.parse()?;

    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::not_found("User", user_id)));
    }
    if user_id == admin.user_id {
        return Err(AppError::BadRequest("Cannot change your own role".into()));
    }

    let user = UserRepo::set_role(&state.pool, user_id, role)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", user_id)))?;

    tracing::info!(user_id, admin_id = admin.user_id, %role, "User role changed");

    Ok(Json(UserUpdateResponse {
        message: "User role updated successfully",
        user: user.into(),
    }))
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// DELETE /api/v1/admin/questions/{id}
///
/// Delete any question together with its answers and their votes.
pub async fn delete_question(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(question_id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = QuestionRepo::delete_cascade(&state.pool, question_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Question", question_id)));
    }

    tracing::info!(question_id, admin_id = admin.user_id, "Question deleted by admin");

    Ok(Json(MessageResponse::new("Question deleted successfully")))
}

/// DELETE /api/v1/admin/answers/{id}
pub async fn delete_answer(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(answer_id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    remove_answer(&state, answer_id, admin.user_id).await?;
    Ok(Json(MessageResponse::new("Answer deleted successfully")))
}

/// POST /api/v1/admin/announcements
///
/// Send one notification to every non-banned user in a single statement.
pub async fn send_announcement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<AnnouncementRequest>,
) -> AppResult<Json<AnnouncementResponse>> {
    let message = require_text("Message", input.message.as_deref())?;
    let link = input
        .link
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());

    let recipients = NotificationRepo::broadcast(
        &state.pool,
        NotificationKind::Mention,
        &announcement_message(&message),
        link,
    )
    .await?;

    tracing::info!(admin_id = admin.user_id, recipients, "Announcement sent");

    Ok(Json(AnnouncementResponse {
        message: "Announcement sent successfully",
        recipients,
    }))
}
