mod common;

use axum::http::{Method, StatusCode};
use common::test_app;
use reg_system::model::Admin;
use serde_json::json;

fn student(id: &str) -> serde_json::Value {
    json!({
        "student_id": id,
        "first_name": "Somchai",
        "last_name": "Jaidee",
        "email": format!("{}@example.ac.th", id),
        "phone": "0812345678",
        "faculty_id": "ENG",
        "major_id": "CPE",
    })
}

#[tokio::test]
async fn student_lifecycle() {
    let app = test_app();
    app.json(Method::POST, "/faculties", json!({"faculty_id": "ENG", "faculty_name": "Engineering"}))
        .await;
    app.json(
        Method::POST,
        "/majors",
        json!({"major_id": "CPE", "major_name": "Computer Engineering", "faculty_id": "ENG"}),
    )
    .await;

    let (status, body) = app.json(Method::POST, "/students", student("6401001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student_id"], "6401001");

    let (status, body) = app.get("/students/6401001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["faculty_name"], "Engineering");
    assert_eq!(body["major_name"], "Computer Engineering");

    let (status, body) = app.json(Method::PUT, "/students/6401001", json!({"phone": null})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], serde_json::Value::Null);
    assert_eq!(body["first_name"], "Somchai");

    let (_, list) = app.get("/students").await;
    assert_eq!(list[0]["no"], 1);
    assert_eq!(list[0]["major_name"], "Computer Engineering");

    let (status, body) = app.delete("/students/6401001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Delete student success");
    assert_eq!(app.get("/students/6401001").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_email_cannot_be_broken_by_update() {
    let app = test_app();
    app.json(Method::POST, "/students", student("6401003")).await;
    let (status, _) = app.json(Method::PUT, "/students/6401003", json!({"email": "nope"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, stored) = app.get("/students/6401003").await;
    assert_eq!(stored["email"], "6401003@example.ac.th");
}

#[tokio::test]
async fn student_requires_valid_email() {
    let app = test_app();
    let mut body = student("6401002");
    body["email"] = json!("not-an-email");
    let (status, err) = app.json(Method::POST, "/students", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["message"], "email must be a valid email");
    assert_eq!(app.store.row_count("students"), 0);
}

#[tokio::test]
async fn teacher_lifecycle() {
    let app = test_app();
    let (status, _) = app
        .json(
            Method::POST,
            "/teachers",
            json!({
                "teacher_id": "T001",
                "first_name": "Suda",
                "last_name": "Rakdee",
                "email": "suda@example.ac.th",
                "position_id": 1,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .json(Method::PUT, "/teachers/T001", json!({"position_id": 2, "last_name": "Meesuk"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position_id"], 2);
    assert_eq!(body["last_name"], "Meesuk");
    assert_eq!(body["email"], "suda@example.ac.th");

    let (status, _) = app.json(Method::PUT, "/teachers/T404", json!({"last_name": "X"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.get("/teachers/").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(app.delete("/teachers/T001").await.0, StatusCode::OK);
    assert_eq!(app.store.row_count("teachers"), 0);
}

#[tokio::test]
async fn admin_is_read_only() {
    let app = test_app();
    app.state
        .admins
        .create(Admin {
            admin_id: "A1".into(),
            first_name: "Root".into(),
            last_name: "Admin".into(),
            email: "admin@example.ac.th".into(),
        })
        .await
        .unwrap();
    let (status, body) = app.get("/admin/A1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "admin@example.ac.th");
    assert_eq!(app.get("/admin/A2").await.0, StatusCode::NOT_FOUND);
}
