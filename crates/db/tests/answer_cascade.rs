//! Cascading deletes and accepted-answer integrity.

use sqlx::PgPool;
use stackit_core::notifications::{answer_posted, NewNotification};
use stackit_core::roles::Role;
use stackit_core::types::DbId;
use stackit_core::voting::VoteDirection;
use stackit_db::models::answer::CreateAnswer;
use stackit_db::models::question::CreateQuestion;
use stackit_db::models::user::CreateUser;
use stackit_db::repositories::{AnswerRepo, NotificationRepo, QuestionRepo, UserRepo, VoteRepo};

async fn user(pool: &PgPool, name: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            username: name.to_string(),
            email: format!("{name}@test.com"),
            password_hash: "x".to_string(),
            role: Role::User,
        },
    )
    .await
    .unwrap()
    .id
}

async fn question(pool: &PgPool, owner: DbId) -> DbId {
    QuestionRepo::create(
        pool,
        &CreateQuestion {
            user_id: owner,
            title: "Why?".to_string(),
            description: "Because.".to_string(),
            tags: vec!["meta".to_string()],
        },
    )
    .await
    .unwrap()
    .id
}

async fn answer(
    pool: &PgPool,
    question_id: DbId,
    author: DbId,
    notification: Option<&NewNotification>,
) -> DbId {
    AnswerRepo::create(
        pool,
        &CreateAnswer {
            question_id,
            user_id: author,
            content: "Answer".to_string(),
        },
        notification,
    )
    .await
    .unwrap()
    .id
}

async fn vote_count(pool: &PgPool, answer_id: DbId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE answer_id = $1")
        .bind(answer_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn answer_delete_removes_votes_and_acceptance(pool: PgPool) {
    let owner = user(&pool, "owner").await;
    let voter = user(&pool, "voter").await;
    let q = question(&pool, owner).await;
    let a = answer(&pool, q, owner, None).await;
    let kept = answer(&pool, q, owner, None).await;
    VoteRepo::cast(&pool, voter, a, VoteDirection::Up).await.unwrap();
    VoteRepo::cast(&pool, voter, kept, VoteDirection::Down).await.unwrap();
    assert!(QuestionRepo::set_accepted_answer(&pool, q, a).await.unwrap());

    assert!(AnswerRepo::delete_cascade(&pool, a).await.unwrap());

    assert!(AnswerRepo::find_by_id(&pool, a).await.unwrap().is_none());
    assert_eq!(vote_count(&pool, a).await, 0);
    assert_eq!(vote_count(&pool, kept).await, 1);
    let q_row = QuestionRepo::find_by_id(&pool, q).await.unwrap().unwrap();
    assert_eq!(q_row.accepted_answer_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_missing_answer_returns_false(pool: PgPool) {
    assert!(!AnswerRepo::delete_cascade(&pool, 99).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn question_delete_removes_answers_and_votes(pool: PgPool) {
    let owner = user(&pool, "owner").await;
    let voter = user(&pool, "voter").await;
    let q = question(&pool, owner).await;
    let a = answer(&pool, q, owner, None).await;
    VoteRepo::cast(&pool, voter, a, VoteDirection::Up).await.unwrap();
    QuestionRepo::set_accepted_answer(&pool, q, a).await.unwrap();

    assert!(QuestionRepo::delete_cascade(&pool, q).await.unwrap());

    assert!(QuestionRepo::find_by_id(&pool, q).await.unwrap().is_none());
    assert!(AnswerRepo::find_by_id(&pool, a).await.unwrap().is_none());
    assert_eq!(vote_count(&pool, a).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn accepted_answer_must_belong_to_question(pool: PgPool) {
    let owner = user(&pool, "owner").await;
    let first = question(&pool, owner).await;
    let second = question(&pool, owner).await;
    let foreign = answer(&pool, second, owner, None).await;

    let result = QuestionRepo::set_accepted_answer(&pool, first, foreign).await;

    assert!(result.is_err(), "composite key must reject a foreign answer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notification_commits_with_answer(pool: PgPool) {
    let owner = user(&pool, "owner").await;
    let helper = user(&pool, "helper").await;
    let q = question(&pool, owner).await;
    let notification = answer_posted(q, "Why?", owner, helper, "helper");

    answer(&pool, q, helper, notification.as_ref()).await;

    let received = NotificationRepo::list_for_user(&pool, owner, 10, 0).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].kind, stackit_core::notifications::NotificationKind::Answer);
    assert_eq!(received[0].message, "helper answered your question: \"Why?\"");
    assert_eq!(received[0].link.as_deref(), Some(&*format!("/questions/{q}")));
    assert_eq!(NotificationRepo::unread_count(&pool, owner).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_notification_rolls_back_answer(pool: PgPool) {
    let owner = user(&pool, "owner").await;
    let q = question(&pool, owner).await;
    let bad = NewNotification {
        recipient_id: 987_654,
        kind: stackit_core::notifications::NotificationKind::Answer,
        message: "nobody".to_string(),
        link: None,
    };

    let result = AnswerRepo::create(
        &pool,
        &CreateAnswer {
            question_id: q,
            user_id: owner,
            content: "Answer".to_string(),
        },
        Some(&bad),
    )
    .await;
    assert!(result.is_err());

    let answers = AnswerRepo::list_for_question(&pool, q).await.unwrap();
    assert!(answers.is_empty());
}
