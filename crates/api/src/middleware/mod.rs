//! Request extractors that establish who is calling.
//!
//! [`auth::AuthUser`] for any signed-in account, [`rbac::RequireAdmin`] for
//! moderation endpoints.

pub mod auth;
pub mod rbac;
