//! Account roles and ownership-based capability checks.
//!
//! The role set is closed: an account is either a regular user or an
//! administrator. The `users.role` column stores [`Role::as_str`] and is
//! constrained to the same two values by the schema.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Role must be \"{ROLE_USER}\" or \"{ROLE_ADMIN}\", got \"{other}\""
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content fields of a question or answer may only be edited by its author.
pub fn can_edit(owner_id: DbId, actor_id: DbId) -> bool {
    owner_id == actor_id
}

/// Answers may be deleted by their author or by any admin.
pub fn can_delete(owner_id: DbId, actor_id: DbId, actor_role: Role) -> bool {
    owner_id == actor_id || actor_role.is_admin()
}

/// Only the question's owner may mark an answer as accepted. Admins get no
/// override here.
pub fn can_accept(question_owner_id: DbId, actor_id: DbId) -> bool {
    question_owner_id == actor_id
}

/// Return `Forbidden` with `msg` unless `allowed`.
pub fn ensure(allowed: bool, msg: &str) -> Result<(), CoreError> {
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(msg.to_string()))
    }
}
