//! Request handlers, one submodule per resource.
//!
//! Handlers check authorization and existence, then delegate to the
//! repositories in `stackit_db`. Errors are mapped via [`crate::error::AppError`].

pub mod admin;
pub mod answer;
pub mod auth;
pub mod notification;
pub mod question;
