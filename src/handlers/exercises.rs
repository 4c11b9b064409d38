use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::extract::FormOrJson;
use crate::log_query::{build_log, parse_date, FilterMode, LogItem, LogParams, LogQuery};
use crate::models::{display_date, CreateExercise, User};
use crate::repositories::{ExerciseRepository, UserRepository};

#[derive(Clone)]
pub struct ExercisesState {
    pub user_repo: UserRepository,
    pub exercise_repo: ExerciseRepository,
    pub filter_mode: FilterMode,
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
    /// The owning user's id, not the entry's.
    #[serde(rename = "_id")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub username: String,
    pub count: i64,
    #[serde(rename = "_id")]
    pub user_id: String,
    pub log: Vec<LogItem>,
}

async fn find_user(state: &ExercisesState, id: &str) -> Result<User> {
    state.user_repo.find_by_id(id).await?.ok_or_else(|| {
        tracing::debug!("No user with id {:?}", id);
        AppError::InvalidUserId
    })
}

pub async fn create(
    State(state): State<ExercisesState>,
    Path(user_id): Path<String>,
    FormOrJson(form): FormOrJson<CreateExercise>,
) -> Result<Json<ExerciseResponse>> {
    let user = find_user(&state, &user_id).await?;

    let description = form
        .description()
        .map_err(|msg| AppError::Validation(msg.to_string()))?;
    let duration = form
        .duration()
        .ok_or_else(|| AppError::Validation("Duration must be a whole number".to_string()))?;

    let date = match form.date().filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => parse_date(&raw).unwrap_or_else(|| {
            tracing::debug!("Invalid exercise date {:?}, using today", raw);
            Local::now().date_naive()
        }),
        None => Local::now().date_naive(),
    };

    let entry = state
        .exercise_repo
        .create(&user.id, &description, duration, date)
        .await?;
    tracing::info!("Logged exercise {} for user {}", entry.id, user.id);

    Ok(Json(ExerciseResponse {
        username: user.username,
        description: entry.description,
        duration: entry.duration,
        date: display_date(entry.date),
        user_id: user.id,
    }))
}

pub async fn logs(
    State(state): State<ExercisesState>,
    Path(user_id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<LogResponse>> {
    let user = find_user(&state, &user_id).await?;
    let params = LogParams::from_pairs(pairs);

    let entries = state.exercise_repo.find_by_user(&user.id).await?;
    let query = LogQuery::normalize(&params, entries.len());
    tracing::debug!(
        "Log query for {}: {:?} over {} entries ({} filter)",
        user.id,
        query,
        entries.len(),
        state.filter_mode.as_str()
    );

    let exercise_log = build_log(&entries, &query, state.filter_mode);

    Ok(Json(LogResponse {
        username: user.username,
        count: exercise_log.count,
        user_id: user.id,
        log: exercise_log.log,
    }))
}
