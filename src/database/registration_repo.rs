use sqlx::SqliteExecutor;

use crate::models::RegistrationRow;

const SQL_FIND_BY_PAIR: &str = r#"
SELECT
  registration_id,
  user_id,
  activity_id,
  status,
  registered_at
FROM registrations
WHERE user_id = ? AND activity_id = ?
LIMIT 1
"#;

pub async fn find_by_pair(
    executor: impl SqliteExecutor<'_>,
    user_id: &str,
    activity_id: &str,
) -> sqlx::Result<Option<RegistrationRow>> {
    sqlx::query_as::<_, RegistrationRow>(SQL_FIND_BY_PAIR)
        .bind(user_id)
        .bind(activity_id)
        .fetch_optional(executor)
        .await
}

const SQL_COUNT_JOINED: &str = r#"
SELECT COUNT(*)
FROM registrations
WHERE activity_id = ? AND status = 'joined'
"#;

pub async fn count_joined(
    executor: impl SqliteExecutor<'_>,
    activity_id: &str,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_JOINED)
        .bind(activity_id)
        .fetch_one(executor)
        .await
}

// Capacity enforcement lives inside the write statements themselves: the
// INSERT ... SELECT / guarded UPDATE only land while the joined count is
// still below capacity, so the check and the write are one atomic step.
// rows_affected == 0 means the guard lost.

const SQL_INSERT_JOINED_GUARDED: &str = r#"
INSERT INTO registrations (
  registration_id,
  user_id,
  activity_id,
  status,
  registered_at
)
SELECT ?1, ?2, ?3, 'joined', ?4
WHERE (
  SELECT COUNT(*) FROM registrations
  WHERE activity_id = ?3 AND status = 'joined'
) < ?5
"#;

/// Insert a fresh joined registration, capacity permitting. A unique
/// violation on (user_id, activity_id) bubbles up as a database error for
/// the caller to classify.
pub async fn insert_joined_guarded(
    executor: impl SqliteExecutor<'_>,
    registration_id: &str,
    user_id: &str,
    activity_id: &str,
    registered_at: &str,
    capacity: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_JOINED_GUARDED)
        .bind(registration_id)
        .bind(user_id)
        .bind(activity_id)
        .bind(registered_at)
        .bind(capacity)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_REACTIVATE_GUARDED: &str = r#"
UPDATE registrations
SET status = 'joined', registered_at = ?1
WHERE registration_id = ?2
  AND status = 'cancelled'
  AND (
    SELECT COUNT(*) FROM registrations
    WHERE activity_id = ?3 AND status = 'joined'
  ) < ?4
"#;

/// Flip an existing cancelled row back to joined, capacity permitting.
/// The pair uniqueness constraint is why this is an update in place and
/// never a second insert.
pub async fn reactivate_guarded(
    executor: impl SqliteExecutor<'_>,
    registration_id: &str,
    activity_id: &str,
    registered_at: &str,
    capacity: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_REACTIVATE_GUARDED)
        .bind(registered_at)
        .bind(registration_id)
        .bind(activity_id)
        .bind(capacity)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_CANCEL_REGISTRATION: &str = r#"
UPDATE registrations
SET status = 'cancelled'
WHERE registration_id = ?
  AND status = 'joined'
"#;

pub async fn cancel_registration(
    executor: impl SqliteExecutor<'_>,
    registration_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_CANCEL_REGISTRATION)
        .bind(registration_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_FOR_ACTIVITY: &str = r#"
DELETE FROM registrations
WHERE activity_id = ?
"#;

pub async fn delete_for_activity(
    executor: impl SqliteExecutor<'_>,
    activity_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_FOR_ACTIVITY)
        .bind(activity_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
