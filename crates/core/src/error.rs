//! Domain error taxonomy.
//!
//! Every core operation reports failure through [`CoreError`]; the API layer
//! maps each variant onto an HTTP status.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced question, answer, user or notification does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing or malformed input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness rule was violated (duplicate vote, taken username).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No usable credentials were presented.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to perform this mutation.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        CoreError::Forbidden(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::not_found("Answer", 7);
        assert_eq!(err.to_string(), "Answer with id 7 not found");
    }

    #[test]
    fn helpers_build_expected_variants() {
        assert_matches!(CoreError::validation("x"), CoreError::Validation(m) if m == "x");
        assert_matches!(CoreError::forbidden("nope"), CoreError::Forbidden(m) if m == "nope");
    }
}
