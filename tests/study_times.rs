mod common;

use axum::http::{Method, StatusCode};
use common::{subject_body, test_app, TestApp};
use serde_json::json;

async fn with_subjects() -> TestApp {
    let app = test_app();
    app.json(Method::POST, "/subjects", subject_body("CS201", 3)).await;
    app.json(Method::POST, "/subjects", subject_body("CS202", 3)).await;
    app
}

fn slot(start: &str, end: &str) -> serde_json::Value {
    json!({ "start": start, "end": end })
}

#[tokio::test]
async fn create_and_list_for_subject() {
    let app = with_subjects().await;
    let (status, body) = app
        .json(
            Method::POST,
            "/subjects/CS201/times",
            slot("2024-06-03T08:00:00Z", "2024-06-03T10:00:00Z"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject_id"], "CS201");
    assert_eq!(body["id"], 1);

    app.json(
        Method::POST,
        "/subjects/CS202/times",
        slot("2024-06-04T08:00:00Z", "2024-06-04T10:00:00Z"),
    )
    .await;

    let (status, body) = app.get("/subjects/CS201/times").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, detail) = app.get("/subjects/CS201").await;
    assert_eq!(detail["study_times"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn long_field_names_are_accepted() {
    let app = with_subjects().await;
    let (status, _) = app
        .json(
            Method::POST,
            "/subjects/CS201/times",
            json!({"start_at": "2024-06-03T13:00:00Z", "end_at": "2024-06-03T16:00:00Z"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn end_before_start_is_rejected() {
    let app = with_subjects().await;
    let (status, _) = app
        .json(
            Method::POST,
            "/subjects/CS201/times",
            slot("2024-06-03T10:00:00Z", "2024-06-03T08:00:00Z"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.row_count("subject_study_times"), 0);
}

#[tokio::test]
async fn unknown_subject_has_no_times() {
    let app = with_subjects().await;
    let (status, _) = app.get("/subjects/NOPE/times").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .json(
            Method::POST,
            "/subjects/NOPE/times",
            slot("2024-06-03T08:00:00Z", "2024-06-03T10:00:00Z"),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn time_is_only_reachable_through_its_subject() {
    let app = with_subjects().await;
    app.json(
        Method::POST,
        "/subjects/CS201/times",
        slot("2024-06-03T08:00:00Z", "2024-06-03T10:00:00Z"),
    )
    .await;
    assert_eq!(app.get("/subjects/CS201/times/1").await.0, StatusCode::OK);
    assert_eq!(app.get("/subjects/CS202/times/1").await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.delete("/subjects/CS202/times/1").await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.store.row_count("subject_study_times"), 1);
    assert_eq!(app.get("/subjects/CS201/times/abc").await.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_checks_the_merged_slot() {
    let app = with_subjects().await;
    app.json(
        Method::POST,
        "/subjects/CS201/times",
        slot("2024-06-03T08:00:00Z", "2024-06-03T10:00:00Z"),
    )
    .await;

    let (status, body) = app
        .json(Method::PUT, "/subjects/CS201/times/1", json!({"end": "2024-06-03T11:00:00Z"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_at"], "2024-06-03T08:00:00Z");
    assert_eq!(body["end_at"], "2024-06-03T11:00:00Z");

    let (status, _) = app
        .json(Method::PUT, "/subjects/CS201/times/1", json!({"start": "2024-06-03T12:00:00Z"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_time() {
    let app = with_subjects().await;
    app.json(
        Method::POST,
        "/subjects/CS201/times",
        slot("2024-06-03T08:00:00Z", "2024-06-03T10:00:00Z"),
    )
    .await;
    let (status, body) = app.delete("/subjects/CS201/times/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Delete study time success");
    assert_eq!(app.store.row_count("subject_study_times"), 0);
}
