use std::sync::Arc;

use chrono::{Locale, NaiveDate};
use classbook_client::{
    api::ApiError,
    pages::{
        attendance::{AttendanceStatus, AttendanceViewModel, MarkOutcome},
        feedback::FeedbackViewModel,
        login::{LoginForm, LoginViewModel},
        quiz::{QuizStep, QuizViewModel},
        schedule::ScheduleViewModel,
    },
    utils::storage::FileStorage,
    ApiClient, FileTokenStore, HistoryNavigator, Route, SessionGuard, TokenStore,
};
use httpmock::prelude::*;
use serde_json::json;

struct Harness {
    server: MockServer,
    tokens: Arc<FileTokenStore>,
    nav: Arc<HistoryNavigator>,
    session: SessionGuard,
    dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let tokens = Arc::new(FileTokenStore::new(FileStorage::new(
        dir.path().join("session.json"),
    )));
    let nav = Arc::new(HistoryNavigator::new());
    let session = SessionGuard::new(
        ApiClient::new_with_base_url(server.url("/api")),
        tokens.clone(),
        nav.clone(),
    );
    Harness {
        server,
        tokens,
        nav,
        session,
        dir,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn lesson_json(id: &str, date: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": format!("Lesson {}", id),
        "date": date,
        "time": "09:00",
        "teacher": { "_id": "t1", "name": "Ana" }
    })
}

#[tokio::test]
async fn login_then_schedule_uses_the_stored_token() {
    let h = harness().await;
    h.server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "email": "a@b.com", "password": "x" }));
            then.status(200).json_body(json!({ "token": "t1" }));
        })
        .await;
    let schedule = h
        .server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/student/schedule")
                .header("authorization", "Bearer t1");
            then.status(200).json_body(json!({
                "schedule": [lesson_json("l1", "2024-05-01"), lesson_json("l2", "2024-05-02")]
            }));
        })
        .await;

    let mut login = LoginViewModel::new(h.session.clone());
    login.form = LoginForm::new("a@b.com", "x");
    login.submit().await.unwrap();
    assert_eq!(h.tokens.load().unwrap().as_deref(), Some("t1"));

    let mut vm = ScheduleViewModel::with_today(
        h.session.clone(),
        day(2024, 5, 1),
        chrono_tz::UTC,
        Locale::ro_RO,
    );
    vm.expand_window(3);
    vm.load_schedule().await.unwrap();

    schedule.assert_async().await;
    assert_eq!(vm.select_day(day(2024, 5, 1))[0].id, "l1");
    assert_eq!(vm.select_day(day(2024, 5, 2))[0].id, "l2");
    assert!(vm.select_day(day(2024, 5, 3)).is_empty());
    assert_eq!(h.nav.history(), vec![Route::Home]);
}

#[tokio::test]
async fn token_survives_a_restart_until_rejected() {
    let h = harness().await;
    h.tokens.save("stale").unwrap();

    // A fresh store over the same file sees the persisted token.
    let reopened = FileTokenStore::new(FileStorage::new(h.dir.path().join("session.json")));
    assert_eq!(reopened.load().unwrap().as_deref(), Some("stale"));

    h.server
        .mock_async(|when, then| {
            when.method(GET).path("/api/student/lessons/l1/attendance");
            then.status(403).json_body(json!({ "message": "Forbidden" }));
        })
        .await;
    let mut vm = AttendanceViewModel::new(h.session.clone(), "l1");
    vm.check_status().await;

    assert_eq!(vm.status(), AttendanceStatus::Unknown);
    assert!(reopened.load().unwrap().is_none());
    assert_eq!(h.nav.history(), vec![Route::Login]);
}

#[tokio::test]
async fn attendance_rejection_is_shown_and_marking_is_idempotent() {
    let h = harness().await;
    h.tokens.save("t1").unwrap();
    let closed = h
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/api/student/lessons/l1/attendance");
            then.status(400).json_body(json!({ "message": "Lesson closed" }));
        })
        .await;
    let mut vm = AttendanceViewModel::new(h.session.clone(), "l1");

    let err = vm.mark_present().await.unwrap_err();
    assert_eq!(err.user_message(), "Lesson closed");
    assert_eq!(vm.status(), AttendanceStatus::Unknown);

    closed.delete_async().await;
    let open = h
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/api/student/lessons/l1/attendance");
            then.status(200).json_body(json!({ "attended": true, "message": "Marked" }));
        })
        .await;

    assert_eq!(
        vm.mark_present().await.unwrap(),
        MarkOutcome::Marked("Marked".into())
    );
    assert_eq!(vm.mark_present().await.unwrap(), MarkOutcome::AlreadyPresent);
    open.assert_hits_async(1).await;
}

#[tokio::test]
async fn invalid_feedback_never_leaves_the_client() {
    let h = harness().await;
    h.tokens.save("t1").unwrap();
    let feedback = h
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/api/student/lessons/l1/feedback");
            then.status(200).json_body(json!({}));
        })
        .await;
    let mut vm = FeedbackViewModel::new(h.session.clone(), "l1");

    vm.set_rating(0);
    vm.draft.text = "Good".into();
    assert!(matches!(vm.submit().await, Err(ApiError::Validation(_))));

    vm.set_rating(4);
    vm.draft.text = "   ".into();
    assert!(matches!(vm.submit().await, Err(ApiError::Validation(_))));

    feedback.assert_hits_async(0).await;
}

#[tokio::test]
async fn quiz_blocks_until_answered_then_scores() {
    let h = harness().await;
    h.tokens.save("t1").unwrap();
    h.server
        .mock_async(|when, then| {
            when.method(GET).path("/api/student/lessons/l1");
            then.status(200).json_body(json!({
                "_id": "l1",
                "title": "Fractions",
                "date": "2024-05-01",
                "teacher": { "_id": "t1", "name": "Ana" },
                "quizIds": ["qz1"]
            }));
        })
        .await;
    h.server
        .mock_async(|when, then| {
            when.method(GET).path("/api/student/quizzes/qz1");
            then.status(200).json_body(json!({
                "quiz": {
                    "_id": "qz1",
                    "questions": [{
                        "_id": "q1",
                        "questionText": "2 + 2?",
                        "options": [{ "_id": "a", "text": "3" }, { "_id": "b", "text": "4" }]
                    }]
                }
            }));
        })
        .await;
    h.server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/student/quizzes/qz1/submit")
                .json_body(json!({ "answers": [{ "questionId": "q1", "selectedOption": "4" }] }));
            then.status(200).json_body(json!({ "score": 1 }));
        })
        .await;
    let mut vm = QuizViewModel::new(h.session.clone(), "l1");
    vm.load().await.unwrap();

    assert!(vm.advance().await.is_err());
    assert_eq!(vm.attempt().unwrap().current_index(), 0);

    vm.select_option(0, 1).unwrap();
    match vm.advance().await.unwrap() {
        QuizStep::Finished(result) => assert_eq!(result.to_string(), "Your score: 1/1"),
        other => panic!("unexpected step {:?}", other),
    }
    assert_eq!(h.nav.last(), Some(Route::Back));
}

#[tokio::test]
async fn protected_calls_without_a_session_go_to_login() {
    let h = harness().await;
    let schedule = h
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/api/student/schedule");
            then.status(200).json_body(json!({ "schedule": [] }));
        })
        .await;
    let mut vm = ScheduleViewModel::with_today(
        h.session.clone(),
        day(2024, 5, 1),
        chrono_tz::UTC,
        Locale::en_US,
    );

    assert_eq!(
        vm.load_schedule().await.unwrap_err(),
        ApiError::AuthenticationRequired
    );
    schedule.assert_hits_async(0).await;
    assert_eq!(h.nav.history(), vec![Route::Login]);
}
