//! Route definitions for the `/answers` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::answer;
use crate::state::AppState;

/// Routes mounted at `/answers`.
///
/// ```text
/// POST   /              -> create_answer
/// PUT    /{id}          -> update_answer
/// DELETE /{id}          -> delete_answer
/// POST   /{id}/vote     -> vote
/// GET    /{id}/votes    -> get_votes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(answer::create_answer))
        .route(
            "/{id}",
            put(answer::update_answer).delete(answer::delete_answer),
        )
        .route("/{id}/vote", post(answer::vote))
        .route("/{id}/votes", get(answer::get_votes))
}
