use serde::{Deserialize, Serialize};

use super::SkillLevel;

/// Fixed group size. An activity is promoted the moment the fourth
/// participant joins, and a fifth join is rejected.
pub const ACTIVITY_CAPACITY: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ActivityType {
    /// Recurring venue slot without an owner.
    FixedSchedule,
    /// Proposed by a user, who becomes its creator.
    Proposed,
}

/// Lifecycle: waiting -> confirmed -> finished. Cancelled exists in the
/// schema but no flow currently reaches it; activities that die early are
/// deleted outright when their creator leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ActivityStatus {
    Waiting,
    Confirmed,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityRow {
    pub activity_id: String,
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    pub required_level: SkillLevel,
    pub scheduled_at: String,
    pub location: String,
    pub creator_user_id: Option<String>,
    pub created_at: String,
}

/// Activity plus its current joined count, for listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityListRow {
    pub activity_id: String,
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    pub required_level: SkillLevel,
    pub scheduled_at: String,
    pub location: String,
    pub creator_user_id: Option<String>,
    pub created_at: String,
    pub joined_count: i64,
}
