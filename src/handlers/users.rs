use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::extract::FormOrJson;
use crate::models::{CreateUser, User};
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct UsersState {
    pub user_repo: UserRepository,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}

pub async fn create(
    State(state): State<UsersState>,
    FormOrJson(form): FormOrJson<CreateUser>,
) -> Result<Json<UserResponse>> {
    let username = form
        .username()
        .ok_or_else(|| AppError::Validation("Username is required".to_string()))?;

    let user = state.user_repo.create(&username).await?;
    tracing::info!("Created user {} ({})", user.username, user.id);

    Ok(Json(user.into()))
}

pub async fn list(State(state): State<UsersState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.user_repo.find_all().await?;
    tracing::debug!("Listing {} users", users.len());

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
