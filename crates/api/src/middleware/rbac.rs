//! Admin-only access.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stackit_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] whose current role is `admin`. Anyone else gets 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role.is_admin() {
            Ok(RequireAdmin(user))
        } else {
            tracing::debug!(user_id = user.user_id, "Admin route refused");
            Err(CoreError::forbidden("Admin access required").into())
        }
    }
}
