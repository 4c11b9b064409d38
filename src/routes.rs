use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers::{exercises, health, users};

/// Build the application router.
///
/// Every API path also answers with a trailing slash. Anything that matches
/// no route is looked up in `public_dir`.
pub fn create_router(
    users_state: users::UsersState,
    exercises_state: exercises::ExercisesState,
    public_dir: &Path,
    views_dir: &Path,
) -> Router {
    Router::new()
        // User routes
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/", get(users::list).post(users::create))
        .with_state(users_state)
        // Exercise routes
        .route("/api/users/{id}/exercises", post(exercises::create))
        .route("/api/users/{id}/exercises/", post(exercises::create))
        .route("/api/users/{id}/logs", get(exercises::logs))
        .route("/api/users/{id}/logs/", get(exercises::logs))
        .with_state(exercises_state)
        // Landing page, health and static assets
        .route_service("/", ServeFile::new(views_dir.join("index.html")))
        .route("/health", get(health::health_check))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
