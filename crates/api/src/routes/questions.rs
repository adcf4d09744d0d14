//! Route definitions for the `/questions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::question;
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// GET    /                                   -> list_questions
/// POST   /                                   -> create_question
/// GET    /search/tags                        -> search_by_tags
/// GET    /{id}                               -> get_question
/// PUT    /{id}                               -> update_question
/// POST   /{id}/accept-answer/{answer_id}     -> accept_answer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(question::list_questions).post(question::create_question),
        )
        .route("/search/tags", get(question::search_by_tags))
        .route(
            "/{id}",
            get(question::get_question).put(question::update_question),
        )
        .route(
            "/{id}/accept-answer/{answer_id}",
            post(question::accept_answer),
        )
}
