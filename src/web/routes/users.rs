use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::ServiceError;
use crate::models::{SkillLevel, UserRow};
use crate::services::user_service;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub name: String,
    pub declared_level: SkillLevel,
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<UserRow>), ServiceError> {
    let user = user_service::create_user(&state.pool, &body.name, body.declared_level).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserRow>, ServiceError> {
    let user = user_service::get_user(&state.pool, &user_id).await?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct UpdateLevelBody {
    pub declared_level: SkillLevel,
}

pub async fn update_declared_level_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateLevelBody>,
) -> Result<Json<UserRow>, ServiceError> {
    user_service::update_declared_level(&state.pool, &user_id, body.declared_level).await?;
    let user = user_service::get_user(&state.pool, &user_id).await?;
    Ok(Json(user))
}
