//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Operations that touch more than
//! one row set open their own transaction so callers never observe a
//! partially applied change.

pub mod answer_repo;
pub mod notification_repo;
pub mod question_repo;
pub mod stats_repo;
pub mod user_repo;
pub mod vote_repo;

pub use answer_repo::AnswerRepo;
pub use notification_repo::NotificationRepo;
pub use question_repo::QuestionRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
