use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::user_repo;
use crate::error::ServiceError;
use crate::models::{SkillLevel, UserRow};
use crate::services::now_iso;

pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    declared_level: SkillLevel,
) -> Result<UserRow, ServiceError> {
    let user_id = Uuid::new_v4().to_string();
    let created_at = now_iso();
    user_repo::insert_user(
        pool,
        user_repo::NewUser {
            user_id: &user_id,
            name,
            declared_level,
            created_at: &created_at,
        },
    )
    .await?;

    Ok(UserRow {
        user_id,
        name: name.to_string(),
        declared_level,
        perceived_level: None,
        matches_played: 0,
        created_at,
    })
}

pub async fn get_user(pool: &SqlitePool, user_id: &str) -> Result<UserRow, ServiceError> {
    user_repo::load_user_by_id(pool, user_id)
        .await?
        .ok_or(ServiceError::NotFound("user"))
}

/// Declared level is the user's own claim and stays editable; the perceived
/// level next to it is owned by the feedback service.
pub async fn update_declared_level(
    pool: &SqlitePool,
    user_id: &str,
    level: SkillLevel,
) -> Result<(), ServiceError> {
    let changed = user_repo::update_declared_level(pool, user_id, level).await?;
    if changed == 0 {
        return Err(ServiceError::NotFound("user"));
    }
    Ok(())
}
