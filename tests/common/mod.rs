#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use matchup::database::init_schema;
use matchup::models::{ActivityRow, ActivityType, SkillLevel, UserRow};
use matchup::services::activities_service::{self, NewActivity};
use matchup::services::user_service;

/// One-connection in-memory pool: every in-memory SQLite connection is its
/// own database, so the pool must never hand out a second one.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    init_schema(&pool).await.expect("schema init");
    pool
}

pub async fn create_user(pool: &SqlitePool, name: &str) -> UserRow {
    user_service::create_user(pool, name, SkillLevel::Intermediate)
        .await
        .expect("create user")
}

pub async fn create_proposed_activity(pool: &SqlitePool, creator_user_id: &str) -> ActivityRow {
    activities_service::create_activity(
        pool,
        NewActivity {
            activity_type: ActivityType::Proposed,
            required_level: SkillLevel::Intermediate,
            scheduled_at: "2026-09-01T18:00:00.000000".to_string(),
            location: "Court 2".to_string(),
            creator_user_id: Some(creator_user_id.to_string()),
        },
    )
    .await
    .expect("create activity")
}

pub async fn create_fixed_activity(pool: &SqlitePool, scheduled_at: &str) -> ActivityRow {
    activities_service::create_activity(
        pool,
        NewActivity {
            activity_type: ActivityType::FixedSchedule,
            required_level: SkillLevel::Intermediate,
            scheduled_at: scheduled_at.to_string(),
            location: "Court 1".to_string(),
            creator_user_id: None,
        },
    )
    .await
    .expect("create activity")
}

pub async fn joined_count(pool: &SqlitePool, activity_id: &str) -> i64 {
    matchup::database::registration_repo::count_joined(pool, activity_id)
        .await
        .expect("count joined")
}
