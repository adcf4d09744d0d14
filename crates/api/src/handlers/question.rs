//! Handlers for the `/questions` resource, including answer acceptance.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stackit_core::error::CoreError;
use stackit_core::pagination::{offset_for, PageInfo};
use stackit_core::roles::{can_accept, can_edit, ensure};
use stackit_core::tags::{normalize_tags, parse_tag_query, validate_tag_count};
use stackit_core::types::DbId;
use stackit_core::validation::require_text;
use stackit_db::models::answer::AnswerWithAuthor;
use stackit_db::models::question::{
    CreateQuestion, QuestionSummary, QuestionWithAuthor, UpdateQuestion,
};
use stackit_db::repositories::{AnswerRepo, QuestionRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Default page size for question listing.
const DEFAULT_LIMIT: i64 = 10;

/// Maximum page size for question listing.
const MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /questions`.
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `PUT /questions/{id}`. Absent fields are left as is.
#[derive(Debug, Deserialize)]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Query parameters for `GET /questions/search/tags`.
#[derive(Debug, Deserialize)]
pub struct TagSearchQuery {
    pub tags: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<QuestionSummary>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetailResponse {
    pub question: QuestionWithAuthor,
    /// The answer `question.acceptedAnswerId` points at, if any.
    pub accepted_answer: Option<AnswerWithAuthor>,
    pub answers: Vec<AnswerWithAuthor>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/questions
///
/// One page of questions, newest first.
pub async fn list_questions(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<QuestionListResponse>> {
    let (page, limit) = params.resolve(DEFAULT_LIMIT, MAX_LIMIT);

    let questions = QuestionRepo::list(&state.pool, limit, offset_for(page, limit)).await?;
    let total = QuestionRepo::count(&state.pool).await?;

    Ok(Json(QuestionListResponse {
        questions,
        pagination: PageInfo::new(page, limit, total),
    }))
}

/// GET /api/v1/questions/{id}
///
/// A question with its author, its accepted answer and all of its answers,
/// best first.
pub async fn get_question(
    State(state): State<AppState>,
    AppPath(question_id): AppPath<DbId>,
) -> AppResult<Json<QuestionDetailResponse>> {
    let question = QuestionRepo::find_with_author(&state.pool, question_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Question", question_id)))?;

    let answers = AnswerRepo::list_for_question(&state.pool, question_id).await?;
    let accepted_answer = question
        .question
        .accepted_answer_id
        .and_then(|id| answers.iter().find(|a| a.answer.id == id).cloned());

    Ok(Json(QuestionDetailResponse {
        question,
        accepted_answer,
        answers,
    }))
}

/// POST /api/v1/questions
pub async fn create_question(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateQuestionRequest>,
) -> AppResult<(StatusCode, Json<QuestionWithAuthor>)> {
    let title = require_text("Title", input.title.as_deref())?;
    let description = require_text("Description", input.description.as_deref())?;
    let tags = normalize_tags(&input.tags);
    validate_tag_count(&tags).map_err(CoreError::Validation)?;

    let question = QuestionRepo::create(
        &state.pool,
        &CreateQuestion {
            user_id: auth.user_id,
            title,
            description,
            tags,
        },
    )
    .await?;

    tracing::info!(question_id = question.id, user_id = auth.user_id, "Question created");

    Ok((
        StatusCode::CREATED,
        Json(QuestionWithAuthor {
            question,
            author_username: auth.username,
        }),
    ))
}

/// PUT /api/v1/questions/{id}
///
/// Partial update. Owner only.
pub async fn update_question(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(question_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateQuestionRequest>,
) -> AppResult<Json<QuestionWithAuthor>> {
    let existing = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Question", question_id)))?;

    ensure(
        can_edit(existing.user_id, auth.user_id),
        "Not authorized to edit this question",
    )?;

    let title = input
        .title
        .as_deref()
        .map(|t| require_text("Title", Some(t)))
        .transpose()?;
    let description = input
        .description
        .as_deref()
        .map(|d| require_text("Description", Some(d)))
        .transpose()?;
    let tags = match input.tags {
        Some(raw) => {
            let tags = normalize_tags(&raw);
            validate_tag_count(&tags).map_err(CoreError::Validation)?;
            Some(tags)
        }
        None => None,
    };

    QuestionRepo::update(
        &state.pool,
        question_id,
        &UpdateQuestion {
            title,
            description,
            tags,
        },
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Question", question_id)))?;

    let updated = QuestionRepo::find_with_author(&state.pool, question_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Question", question_id)))?;

    Ok(Json(updated))
}

/// GET /api/v1/questions/search/tags?tags=a,b
///
/// Questions carrying any of the given tags.
pub async fn search_by_tags(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TagSearchQuery>,
) -> AppResult<Json<Vec<QuestionSummary>>> {
    let tags = parse_tag_query(params.tags.as_deref().unwrap_or_default());
    if tags.is_empty() {
        return Err(AppError::BadRequest("Tags parameter is required".into()));
    }

    let questions = QuestionRepo::search_by_tags(&state.pool, &tags).await?;
    Ok(Json(questions))
}

/// POST /api/v1/questions/{id}/accept-answer/{answer_id}
///
/// Mark one of the question's answers as accepted, replacing any earlier
/// choice. Only the question's owner may do this.
pub async fn accept_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath((question_id, answer_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    let question = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Question", question_id)))?;

    ensure(
        can_accept(question.user_id, auth.user_id),
        "Only the question owner can accept answers",
    )?;

    let answer = AnswerRepo::find_by_id(&state.pool, answer_id)
        .await?
        .filter(|a| a.question_id == question_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("Answer", answer_id)))?;

    QuestionRepo::set_accepted_answer(&state.pool, question_id, answer.id).await?;

    tracing::info!(question_id, answer_id, user_id = auth.user_id, "Answer accepted");

    Ok(Json(MessageResponse::new("Answer accepted successfully")))
}
