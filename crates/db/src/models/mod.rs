//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Joined read models that carry resolved usernames
//! - `Create*` / `Update*` DTOs consumed by the repositories
//!
//! Entities serialize in camelCase, which is the JSON shape of the API.

pub mod answer;
pub mod notification;
pub mod question;
pub mod stats;
pub mod user;
pub mod vote;
