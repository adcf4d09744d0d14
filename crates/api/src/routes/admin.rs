//! Route definitions for the `/admin` resource.
//!
//! All endpoints require the `admin` role.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /stats                 -> stats
/// GET    /activity              -> activity
/// GET    /users                 -> list_users
/// PUT    /users/{id}/ban        -> set_ban
/// PUT    /users/{id}/role       -> set_role
/// DELETE /questions/{id}        -> delete_question
/// DELETE /answers/{id}          -> delete_answer
/// POST   /announcements         -> send_announcement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/activity", get(admin::activity))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/ban", put(admin::set_ban))
        .route("/users/{id}/role", put(admin::set_role))
        .route("/questions/{id}", delete(admin::delete_question))
        .route("/answers/{id}", delete(admin::delete_answer))
        .route("/announcements", post(admin::send_announcement))
}
