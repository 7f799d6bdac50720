use sqlx::SqliteExecutor;

use crate::models::SkillLevel;

pub struct NewFeedback<'a> {
    pub feedback_id: &'a str,
    pub author_user_id: &'a str,
    pub target_user_id: &'a str,
    pub activity_id: &'a str,
    pub suggested_level: SkillLevel,
    pub comment: Option<&'a str>,
    pub created_at: &'a str,
}

const SQL_INSERT_FEEDBACK: &str = r#"
INSERT INTO feedback (
  feedback_id,
  author_user_id,
  target_user_id,
  activity_id,
  suggested_level,
  comment,
  created_at
) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

/// A unique violation on (author, target, activity) bubbles up as a
/// database error for the caller to classify.
pub async fn insert_feedback(
    executor: impl SqliteExecutor<'_>,
    feedback: NewFeedback<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_FEEDBACK)
        .bind(feedback.feedback_id)
        .bind(feedback.author_user_id)
        .bind(feedback.target_user_id)
        .bind(feedback.activity_id)
        .bind(feedback.suggested_level)
        .bind(feedback.comment)
        .bind(feedback.created_at)
        .execute(executor)
        .await?;
    Ok(())
}

const SQL_LIST_LEVELS_FOR_TARGET: &str = r#"
SELECT suggested_level
FROM feedback
WHERE target_user_id = ?
"#;

/// Every suggested level the target has ever received, across activities.
pub async fn list_suggested_levels_for_target(
    executor: impl SqliteExecutor<'_>,
    target_user_id: &str,
) -> sqlx::Result<Vec<SkillLevel>> {
    sqlx::query_scalar::<_, SkillLevel>(SQL_LIST_LEVELS_FOR_TARGET)
        .bind(target_user_id)
        .fetch_all(executor)
        .await
}

const SQL_DELETE_FOR_ACTIVITY: &str = r#"
DELETE FROM feedback
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
