#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;

use exercise_tracker::db::{create_memory_pool, DbPool};
use exercise_tracker::handlers::{exercises, users};
use exercise_tracker::log_query::FilterMode;
use exercise_tracker::migrations::run_migrations_for_tests;
use exercise_tracker::models::{ExerciseEntry, User};
use exercise_tracker::repositories::{ExerciseRepository, UserRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    create_test_app_with_mode(pool, FilterMode::Both)
}

pub fn create_test_app_with_mode(pool: DbPool, filter_mode: FilterMode) -> Router {
    let user_repo = UserRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool);

    let users_state = users::UsersState {
        user_repo: user_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState {
        user_repo,
        exercise_repo,
        filter_mode,
    };

    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    exercise_tracker::routes::create_router(
        users_state,
        exercises_state,
        &root.join("public"),
        &root.join("views"),
    )
}

pub async fn create_test_user(pool: &DbPool, username: &str) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo.create(username).await.unwrap()
}

pub async fn create_test_exercise(
    pool: &DbPool,
    user_id: &str,
    description: &str,
    duration: i64,
    date: NaiveDate,
) -> ExerciseEntry {
    let exercise_repo = ExerciseRepository::new(pool.clone());
    exercise_repo
        .create(user_id, description, duration, date)
        .await
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).expect("response body is not JSON")
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}
