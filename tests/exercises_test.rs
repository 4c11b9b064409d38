mod common;

use axum::http::StatusCode;
use chrono::Local;
use serde_json::json;
use tower::ServiceExt;

use exercise_tracker::models::display_date;
use exercise_tracker::repositories::ExerciseRepository;

#[tokio::test]
async fn test_add_exercise_with_date() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice").await;

    let response = app
        .oneshot(common::post_json(
            &format!("/api/users/{}/exercises", user.id),
            json!({ "description": "run", "duration": 30, "date": "2024-01-15" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(
        body,
        json!({
            "username": "alice",
            "description": "run",
            "duration": 30,
            "date": "Mon Jan 15 2024",
            "_id": user.id,
        })
    );

    let entries = ExerciseRepository::new(pool)
        .find_by_user(&user.id)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, common::date(2024, 1, 15));
}

#[tokio::test]
async fn test_add_exercise_form_with_trailing_slash() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "bob").await;

    let response = app
        .oneshot(common::post_form(
            &format!("/api/users/{}/exercises/", user.id),
            "description=Push%20ups&duration=15&date=2023-12-31",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["description"], "Push ups");
    assert_eq!(body["duration"], 15);
    assert_eq!(body["date"], "Sun Dec 31 2023");
}

#[tokio::test]
async fn test_add_exercise_defaults_date_to_today() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice").await;
    let uri = format!("/api/users/{}/exercises", user.id);

    let before = display_date(Local::now().date_naive());
    let missing = app
        .clone()
        .oneshot(common::post_json(&uri, json!({ "description": "run", "duration": 30 })))
        .await
        .unwrap();
    let empty = app
        .clone()
        .oneshot(common::post_form(&uri, "description=run&duration=30&date="))
        .await
        .unwrap();
    let invalid = app
        .oneshot(common::post_json(
            &uri,
            json!({ "description": "run", "duration": 30, "date": "someday" }),
        ))
        .await
        .unwrap();
    let after = display_date(Local::now().date_naive());

    for response in [missing, empty, invalid] {
        assert_eq!(response.status(), StatusCode::OK);
        let body = common::body_json(response).await;
        let date = body["date"].as_str().unwrap();
        assert!(date == before || date == after, "unexpected date {}", date);
    }
}

#[tokio::test]
async fn test_add_exercise_unknown_user() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let response = app
        .oneshot(common::post_json(
            "/api/users/not-a-user/exercises",
            json!({ "description": "run", "duration": 30 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::body_json(response).await;
    assert_eq!(body, json!({ "Error": "Invalid user id" }));

    // Nothing is written for an unknown user
    let entries = ExerciseRepository::new(pool)
        .find_by_user("not-a-user")
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_add_exercise_requires_description() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice").await;

    let response = app
        .oneshot(common::post_json(
            &format!("/api/users/{}/exercises", user.id),
            json!({ "duration": 30 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["Error"], "Description is required");
}

#[tokio::test]
async fn test_add_exercise_requires_integer_duration() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice").await;
    let uri = format!("/api/users/{}/exercises", user.id);

    for body in [
        json!({ "description": "run" }),
        json!({ "description": "run", "duration": "thirty" }),
        json!({ "description": "run", "duration": 12.5 }),
    ] {
        let response = app
            .clone()
            .oneshot(common::post_json(&uri, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let entries = ExerciseRepository::new(pool)
        .find_by_user(&user.id)
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_add_exercise_malformed_json() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice").await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri(format!("/api/users/{}/exercises", user.id))
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert!(body["Error"].is_string());
}

#[tokio::test]
async fn test_add_exercise_description_must_be_text() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice").await;

    let response = app
        .oneshot(common::post_json(
            &format!("/api/users/{}/exercises", user.id),
            json!({ "description": false, "duration": 30 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["Error"], "Description must be text");
}
