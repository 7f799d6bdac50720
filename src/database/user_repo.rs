use sqlx::SqliteExecutor;

use crate::models::{SkillLevel, UserRow};

pub struct NewUser<'a> {
    pub user_id: &'a str,
    pub name: &'a str,
    pub declared_level: SkillLevel,
    pub created_at: &'a str,
}

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (
  user_id,
  name,
  declared_level,
  perceived_level,
  matches_played,
  created_at
) VALUES (?, ?, ?, NULL, 0, ?)
"#;

pub async fn insert_user(
    executor: impl SqliteExecutor<'_>,
    user: NewUser<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_USER)
        .bind(user.user_id)
        .bind(user.name)
        .bind(user.declared_level)
        .bind(user.created_at)
        .execute(executor)
        .await?;
    Ok(())
}

const SQL_LOAD_USER: &str = r#"
SELECT
  user_id,
  name,
  declared_level,
  perceived_level,
  matches_played,
  created_at
FROM users
WHERE user_id = ?
LIMIT 1
"#;

pub async fn load_user_by_id(
    executor: impl SqliteExecutor<'_>,
    user_id: &str,
) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LOAD_USER)
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

const SQL_UPDATE_DECLARED_LEVEL: &str = r#"
UPDATE users
SET declared_level = ?
WHERE user_id = ?
"#;

pub async fn update_declared_level(
    executor: impl SqliteExecutor<'_>,
    user_id: &str,
    level: SkillLevel,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_DECLARED_LEVEL)
        .bind(level)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_SET_PERCEIVED_LEVEL: &str = r#"
UPDATE users
SET perceived_level = ?
WHERE user_id = ?
"#;

/// Only the feedback service writes this column.
pub async fn set_perceived_level(
    executor: impl SqliteExecutor<'_>,
    user_id: &str,
    level: Option<SkillLevel>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_SET_PERCEIVED_LEVEL)
        .bind(level)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_INCREMENT_MATCHES_PLAYED: &str = r#"
UPDATE users
SET matches_played = matches_played + 1
WHERE user_id IN (
  SELECT user_id FROM registrations
  WHERE activity_id = ? AND status = 'joined'
)
"#;

/// Bump the played counter for everyone still joined to the activity.
pub async fn increment_matches_played_for_activity(
    executor: impl SqliteExecutor<'_>,
    activity_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INCREMENT_MATCHES_PLAYED)
        .bind(activity_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
