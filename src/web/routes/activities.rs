use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::ServiceError;
use crate::models::{ActivityListRow, ActivityRow, ActivityType, FeedbackRow, RegistrationRow, SkillLevel};
use crate::services::activities_service::{self, ActivitySort, NewActivity};
use crate::services::{feedback_service, lifecycle_service, registration_service};
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateActivityBody {
    pub activity_type: ActivityType,
    pub required_level: SkillLevel,
    pub scheduled_at: String,
    pub location: String,
    pub creator_user_id: Option<String>,
}

pub async fn create_activity_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateActivityBody>,
) -> Result<(StatusCode, Json<ActivityRow>), ServiceError> {
    let activity = activities_service::create_activity(
        &state.pool,
        NewActivity {
            activity_type: body.activity_type,
            required_level: body.required_level,
            scheduled_at: body.scheduled_at,
            location: body.location,
            creator_user_id: body.creator_user_id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

#[derive(Debug, Deserialize, Default)]
pub struct ListActivitiesQuery {
    pub sort: Option<String>,
    pub level: Option<String>,
}

pub async fn list_activities_handler(
    State(state): State<AppState>,
    Query(query): Query<ListActivitiesQuery>,
) -> Result<Json<Vec<ActivityListRow>>, ServiceError> {
    let sort = ActivitySort::parse(query.sort.as_deref());
    let level_filter = query.level.as_deref().and_then(|s| s.parse::<SkillLevel>().ok());
    let rows = activities_service::list_activities(&state.pool, sort, level_filter).await?;
    Ok(Json(rows))
}

pub async fn get_activity_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<ActivityRow>, ServiceError> {
    let activity = activities_service::get_activity(&state.pool, &activity_id).await?;
    Ok(Json(activity))
}

#[derive(Debug, Deserialize)]
pub struct SignupBody {
    pub user_id: String,
}

pub async fn join_activity_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
    Json(body): Json<SignupBody>,
) -> Result<(StatusCode, Json<RegistrationRow>), ServiceError> {
    let registration = registration_service::join_activity(
        &state.pool,
        state.sink.as_ref(),
        &body.user_id,
        &activity_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn leave_activity_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
    Json(body): Json<SignupBody>,
) -> Result<StatusCode, ServiceError> {
    registration_service::leave_activity(&state.pool, &body.user_id, &activity_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn finish_activity_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    lifecycle_service::finish_activity(&state.pool, state.sink.as_ref(), &activity_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct FeedbackBody {
    pub author_user_id: String,
    pub target_user_id: String,
    pub suggested_level: SkillLevel,
    pub comment: Option<String>,
}

pub async fn submit_feedback_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
    Json(body): Json<FeedbackBody>,
) -> Result<(StatusCode, Json<FeedbackRow>), ServiceError> {
    let feedback = feedback_service::submit_feedback(
        &state.pool,
        &body.author_user_id,
        &body.target_user_id,
        &activity_id,
        body.suggested_level,
        body.comment.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}
