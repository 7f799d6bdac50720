pub mod activities_service;
pub mod feedback_service;
pub mod lifecycle_service;
pub mod registration_service;
pub mod user_service;

/// Timestamps are stored as ISO-8601 TEXT and compared lexicographically,
/// so every writer must use this one format.
pub fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
