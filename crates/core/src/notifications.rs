//! Notification kinds and the messages the system generates.
//!
//! Notifications are only ever created by the system: when someone answers
//! a question, and when an admin broadcasts an announcement.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const KIND_ANSWER: &str = "answer";
pub const KIND_COMMENT: &str = "comment";
pub const KIND_MENTION: &str = "mention";

/// All values accepted by the `notifications.kind` column.
pub const VALID_KINDS: &[&str] = &[KIND_ANSWER, KIND_COMMENT, KIND_MENTION];

/// Prefix prepended to every announcement message.
pub const ANNOUNCEMENT_PREFIX: &str = "[ANNOUNCEMENT]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Answer,
    Comment,
    Mention,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Answer => KIND_ANSWER,
            NotificationKind::Comment => KIND_COMMENT,
            NotificationKind::Mention => KIND_MENTION,
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            KIND_ANSWER => Ok(NotificationKind::Answer),
            KIND_COMMENT => Ok(NotificationKind::Comment),
            KIND_MENTION => Ok(NotificationKind::Mention),
            other => Err(CoreError::Validation(format!(
                "Invalid notification kind '{other}'. Must be one of: {}",
                VALID_KINDS.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for NotificationKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A notification ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient_id: DbId,
    pub kind: NotificationKind,
    pub message: String,
    pub link: Option<String>,
}

/// Link to a question page, used as the notification target.
pub fn question_link(question_id: DbId) -> String {
    format!("/questions/{question_id}")
}

/// Notification for the owner of a question that just received an answer.
///
/// Returns `None` when the author answered their own question.
pub fn answer_posted(
    question_id: DbId,
    question_title: &str,
    question_owner_id: DbId,
    author_id: DbId,
    author_username: &str,
) -> Option<NewNotification> {
    if question_owner_id == author_id {
        return None;
    }
    Some(NewNotification {
        recipient_id: question_owner_id,
        kind: NotificationKind::Answer,
        message: format!("{author_username} answered your question: \"{question_title}\""),
        link: Some(question_link(question_id)),
    })
}

/// Text every recipient of an admin announcement receives.
pub fn announcement_message(message: &str) -> String {
    format!("{ANNOUNCEMENT_PREFIX} {}", message.trim())
}
