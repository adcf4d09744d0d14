//! Caller identity for handlers that require a signed-in account.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use stackit_core::error::CoreError;
use stackit_core::roles::Role;
use stackit_core::types::DbId;
use stackit_db::repositories::UserRepo;

use crate::auth::jwt::{validate_token, TokenError};
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in account making the request.
///
/// Built from the `Authorization: Bearer <token>` header. The token only
/// names the account; `role` and the ban flag come from the `users` row as
/// it is now.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            unauthorized(match e {
                TokenError::Expired => "Token has expired",
                TokenError::Invalid(_) => "Invalid token",
            })
        })?;

        let Some(user) = UserRepo::find_by_id(&state.pool, claims.sub).await? else {
            return Err(unauthorized("User not found"));
        };
        if user.is_banned {
            return Err(CoreError::forbidden("User is banned").into());
        }

        Ok(AuthUser {
            user_id: user.id,
            role: user.role()?,
            username: user.username,
        })
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("No token provided"))?;

    header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| unauthorized("Expected an Authorization: Bearer <token> header"))
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}
