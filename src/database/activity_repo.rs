use sqlx::SqliteExecutor;

use crate::models::{ActivityListRow, ActivityRow, ActivityType, SkillLevel};

pub struct NewActivityRow<'a> {
    pub activity_id: &'a str,
    pub activity_type: ActivityType,
    pub required_level: SkillLevel,
    pub scheduled_at: &'a str,
    pub location: &'a str,
    pub creator_user_id: Option<&'a str>,
    pub created_at: &'a str,
}

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  activity_id,
  activity_type,
  status,
  required_level,
  scheduled_at,
  location,
  creator_user_id,
  created_at
) VALUES (?, ?, 'waiting', ?, ?, ?, ?, ?)
"#;

pub async fn insert_activity(
    executor: impl SqliteExecutor<'_>,
    activity: NewActivityRow<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_ACTIVITY)
        .bind(activity.activity_id)
        .bind(activity.activity_type)
        .bind(activity.required_level)
        .bind(activity.scheduled_at)
        .bind(activity.location)
        .bind(activity.creator_user_id)
        .bind(activity.created_at)
        .execute(executor)
        .await?;
    Ok(())
}

const SQL_LOAD_ACTIVITY: &str = r#"
SELECT
  activity_id,
  activity_type,
  status,
  required_level,
  scheduled_at,
  location,
  creator_user_id,
  created_at
FROM activities
WHERE activity_id = ?
LIMIT 1
"#;

pub async fn load_activity_by_id(
    executor: impl SqliteExecutor<'_>,
    activity_id: &str,
) -> sqlx::Result<Option<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LOAD_ACTIVITY)
        .bind(activity_id)
        .fetch_optional(executor)
        .await
}

const SQL_LIST_ACTIVITIES_WITH_COUNTS: &str = r#"
SELECT
  a.activity_id,
  a.activity_type,
  a.status,
  a.required_level,
  a.scheduled_at,
  a.location,
  a.creator_user_id,
  a.created_at,
  (
    SELECT COUNT(*) FROM registrations r
    WHERE r.activity_id = a.activity_id AND r.status = 'joined'
  ) AS joined_count
FROM activities a
"#;

pub async fn list_activities_with_counts(
    executor: impl SqliteExecutor<'_>,
) -> sqlx::Result<Vec<ActivityListRow>> {
    sqlx::query_as::<_, ActivityListRow>(SQL_LIST_ACTIVITIES_WITH_COUNTS)
        .fetch_all(executor)
        .await
}

// The status flips below are single conditional statements. The WHERE clause
// carries the whole transition rule, so two racing callers cannot both see
// rows_affected == 1 for the same flip.

const SQL_PROMOTE_WAITING_ACTIVITY: &str = r#"
UPDATE activities
SET status = 'confirmed'
WHERE activity_id = ?
  AND status = 'waiting'
  AND (
    SELECT COUNT(*) FROM registrations
    WHERE activity_id = ? AND status = 'joined'
  ) >= ?
"#;

/// waiting -> confirmed, iff the joined count has reached capacity.
/// Returns the number of rows changed (0 or 1).
pub async fn promote_if_full(
    executor: impl SqliteExecutor<'_>,
    activity_id: &str,
    capacity: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_PROMOTE_WAITING_ACTIVITY)
        .bind(activity_id)
        .bind(activity_id)
        .bind(capacity)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_FINISH_CONFIRMED_ACTIVITY: &str = r#"
UPDATE activities
SET status = 'finished'
WHERE activity_id = ?
  AND status = 'confirmed'
"#;

/// confirmed -> finished. Returns the number of rows changed (0 or 1).
pub async fn finish_if_confirmed(
    executor: impl SqliteExecutor<'_>,
    activity_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_FINISH_CONFIRMED_ACTIVITY)
        .bind(activity_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_LIST_OVERDUE_CONFIRMED: &str = r#"
SELECT activity_id
FROM activities
WHERE status = 'confirmed'
  AND scheduled_at < ?
ORDER BY scheduled_at ASC
"#;

pub async fn list_overdue_confirmed(
    executor: impl SqliteExecutor<'_>,
    now: &str,
) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(SQL_LIST_OVERDUE_CONFIRMED)
        .bind(now)
        .fetch_all(executor)
        .await
}

const SQL_DELETE_ACTIVITY: &str = r#"
DELETE FROM activities
WHERE activity_id = ?
"#;

pub async fn delete_activity(
    executor: impl SqliteExecutor<'_>,
    activity_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ACTIVITY)
        .bind(activity_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
