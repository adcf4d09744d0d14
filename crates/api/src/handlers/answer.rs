//! Handlers for the `/answers` resource: lifecycle and the vote ledger.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stackit_core::error::CoreError;
use stackit_core::notifications::answer_posted;
use stackit_core::roles::{can_delete, can_edit, ensure};
use stackit_core::types::DbId;
use stackit_core::validation::require_text;
use stackit_core::voting::{VoteDirection, VoteTally};
use stackit_db::models::answer::{AnswerWithAuthor, CreateAnswer};
use stackit_db::models::vote::VoteWithVoter;
use stackit_db::repositories::{AnswerRepo, QuestionRepo, VoteRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Unique constraint guarding one vote per (voter, answer).
const VOTE_UNIQUE_CONSTRAINT: &str = "uq_votes_user_answer";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /answers`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    pub question_id: Option<DbId>,
    pub content: Option<String>,
}

/// Request body for `PUT /answers/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAnswerRequest {
    pub content: Option<String>,
}

/// Request body for `POST /answers/{id}/vote`.
///
/// `vote` is read loosely so that a string or a fractional number is
/// reported as a validation error rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub vote: serde_json::Value,
}

/// Response body for `GET /answers/{id}/votes`.
#[derive(Debug, Serialize)]
pub struct VotesResponse {
    pub votes: Vec<VoteWithVoter>,
    pub summary: VoteTally,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/answers
///
/// Post an answer. Notifies the question owner in the same transaction,
/// unless they answered their own question.
pub async fn create_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAnswerRequest>,
) -> AppResult<(StatusCode, Json<AnswerWithAuthor>)> {
    let content = input.content.as_deref().map(str::trim).unwrap_or_default();
    let question_id = match input.question_id {
        Some(id) if !content.is_empty() => id,
        _ => {
            return Err(AppError::Core(CoreError::validation(
                "Question ID and content are required",
            )))
        }
    };

    let question = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Question", question_id)))?;

    let notification = answer_posted(
        question.id,
        &question.title,
        question.user_id,
        auth.user_id,
        &auth.username,
    );

    let answer = AnswerRepo::create(
        &state.pool,
        &CreateAnswer {
            question_id,
            user_id: auth.user_id,
            content: content.to_string(),
        },
        notification.as_ref(),
    )
    .await?;

    tracing::info!(
        answer_id = answer.id,
        question_id,
        user_id = auth.user_id,
        notified = notification.is_some(),
        "Answer created"
    );

    Ok((
        StatusCode::CREATED,
        Json(AnswerWithAuthor {
            answer,
            author_username: auth.username,
        }),
    ))
}

/// PUT /api/v1/answers/{id}
///
/// Replace an answer's content. Author only. Vote counters are untouched.
pub async fn update_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(answer_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAnswerRequest>,
) -> AppResult<Json<AnswerWithAuthor>> {
    let existing = AnswerRepo::find_by_id(&state.pool, answer_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Answer", answer_id)))?;

    ensure(
        can_edit(existing.user_id, auth.user_id),
        "Not authorized to edit this answer",
    )?;

    let content = require_text("Content", input.content.as_deref())?;

    AnswerRepo::update_content(&state.pool, answer_id, &content)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Answer", answer_id)))?;

    let updated = AnswerRepo::find_with_author(&state.pool, answer_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Answer", answer_id)))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/answers/{id}
///
/// Delete an answer with its votes, clearing any acceptance that points at
/// it. Author or admin.
pub async fn delete_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(answer_id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let existing = AnswerRepo::find_by_id(&state.pool, answer_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Answer", answer_id)))?;

    ensure(
        can_delete(existing.user_id, auth.user_id, auth.role),
        "Not authorized to delete this answer",
    )?;

    remove_answer(&state, answer_id, auth.user_id).await?;

    Ok(Json(MessageResponse::new("Answer deleted successfully")))
}

/// Cascade-delete an answer. Shared with the admin endpoint.
pub(crate) async fn remove_answer(
    state: &AppState,
    answer_id: DbId,
    actor_id: DbId,
) -> AppResult<()> {
    let deleted = AnswerRepo::delete_cascade(&state.pool, answer_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Answer", answer_id)));
    }
    tracing::info!(answer_id, actor_id, "Answer deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Vote ledger
// ---------------------------------------------------------------------------

/// POST /api/v1/answers/{id}/vote
///
/// Cast, retract or flip the caller's vote and return the new counters.
pub async fn vote(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(answer_id): AppPath<DbId>,
    AppJson(input): AppJson<VoteRequest>,
) -> AppResult<Json<VoteTally>> {
    let direction = parse_vote(&input.vote)?;

    let outcome = VoteRepo::cast(&state.pool, auth.user_id, answer_id, direction)
        .await
        .map_err(vote_write_error)?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Answer", answer_id)))?;

    tracing::info!(
        answer_id,
        user_id = auth.user_id,
        transition = ?outcome.transition,
        total_votes = outcome.tally.total_votes(),
        "Vote recorded"
    );

    Ok(Json(outcome.tally))
}

/// Map a failed vote write. Losing the race to insert the first vote for a
/// (voter, answer) pair is a conflict; anything else goes through the usual
/// database mapping.
pub fn vote_write_error(err: sqlx::Error) -> AppError {
    if stackit_db::is_unique_violation(&err, VOTE_UNIQUE_CONSTRAINT) {
        AppError::Core(CoreError::Conflict(
            "You have already voted on this answer".into(),
        ))
    } else {
        err.into()
    }
}

/// GET /api/v1/answers/{id}/votes
///
/// Every vote on the answer with the voter's username, plus a summary
/// counted from those votes. An unknown answer has no votes.
pub async fn get_votes(
    State(state): State<AppState>,
    AppPath(answer_id): AppPath<DbId>,
) -> AppResult<Json<VotesResponse>> {
    let votes = VoteRepo::list_for_answer(&state.pool, answer_id).await?;

    let directions = votes
        .iter()
        .map(|v| VoteDirection::from_value(i64::from(v.vote.vote)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(VotesResponse {
        summary: VoteTally::from_votes(directions),
        votes,
    }))
}

/// Accept only the integers `1` and `-1`.
fn parse_vote(value: &serde_json::Value) -> Result<VoteDirection, CoreError> {
    VoteDirection::from_value(value.as_i64().unwrap_or(0))
}
