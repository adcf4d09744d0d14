pub mod admin;
pub mod answers;
pub mod auth;
pub mod health;
pub mod notifications;
pub mod questions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
///
/// /questions                                       list (public), create
/// /questions/search/tags                           tag search (public)
/// /questions/{id}                                  detail (public), update (owner)
/// /questions/{id}/accept-answer/{answer_id}        accept (owner)
///
/// /answers                                         create
/// /answers/{id}                                    update (author), delete (author or admin)
/// /answers/{id}/vote                               cast, retract, flip
/// /answers/{id}/votes                              vote list and summary (public)
///
/// /notifications                                   list
/// /notifications/unread-count                      unread count
/// /notifications/read-all                          mark all read
/// /notifications/{id}                              delete
/// /notifications/{id}/read                         mark read
///
/// /admin/stats                                     platform stats
/// /admin/activity                                  recent activity
/// /admin/users                                     user list
/// /admin/users/{id}/ban                            ban, unban
/// /admin/users/{id}/role                           change role
/// /admin/questions/{id}                            delete question
/// /admin/answers/{id}                              delete answer
/// /admin/announcements                             broadcast
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/questions", questions::router())
        .nest("/answers", answers::router())
        .nest("/notifications", notifications::router())
        .nest("/admin", admin::router())
}
