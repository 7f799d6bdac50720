use sqlx::SqlitePool;

const SQL_CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  user_id TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  declared_level TEXT NOT NULL,
  perceived_level TEXT,
  matches_played INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL
)
"#;

const SQL_CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  activity_id TEXT PRIMARY KEY,
  activity_type TEXT NOT NULL,
  status TEXT NOT NULL,
  required_level TEXT NOT NULL,
  scheduled_at TEXT NOT NULL,
  location TEXT NOT NULL,
  creator_user_id TEXT,
  created_at TEXT NOT NULL
)
"#;

const SQL_CREATE_REGISTRATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS registrations (
  registration_id TEXT PRIMARY KEY,
  user_id TEXT NOT NULL,
  activity_id TEXT NOT NULL,
  status TEXT NOT NULL,
  registered_at TEXT NOT NULL,
  UNIQUE (user_id, activity_id)
)
"#;

const SQL_CREATE_FEEDBACK: &str = r#"
CREATE TABLE IF NOT EXISTS feedback (
  feedback_id TEXT PRIMARY KEY,
  author_user_id TEXT NOT NULL,
  target_user_id TEXT NOT NULL,
  activity_id TEXT NOT NULL,
  suggested_level TEXT NOT NULL,
  comment TEXT,
  created_at TEXT NOT NULL,
  UNIQUE (author_user_id, target_user_id, activity_id)
)
"#;

const SQL_CREATE_IDX_REGISTRATIONS_ACTIVITY: &str = r#"
CREATE INDEX IF NOT EXISTS idx_registrations_activity
ON registrations (activity_id, status)
"#;

const SQL_CREATE_IDX_FEEDBACK_TARGET: &str = r#"
CREATE INDEX IF NOT EXISTS idx_feedback_target
ON feedback (target_user_id)
"#;

/// Create all tables and indexes. Safe to call on every startup.
pub async fn init_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    for statement in [
        SQL_CREATE_USERS,
        SQL_CREATE_ACTIVITIES,
        SQL_CREATE_REGISTRATIONS,
        SQL_CREATE_FEEDBACK,
        SQL_CREATE_IDX_REGISTRATIONS_ACTIVITY,
        SQL_CREATE_IDX_FEEDBACK_TARGET,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
