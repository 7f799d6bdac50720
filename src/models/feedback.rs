use serde::Serialize;

use super::SkillLevel;

/// One peer rating. At most one row per (author, target, activity) triple.
/// Rows are never mutated after insert.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FeedbackRow {
    pub feedback_id: String,
    pub author_user_id: String,
    pub target_user_id: String,
    pub activity_id: String,
    pub suggested_level: SkillLevel,
    pub comment: Option<String>,
    pub created_at: String,
}
