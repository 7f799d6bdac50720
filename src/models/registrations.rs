use serde::{Deserialize, Serialize};

/// Whether the sign-up currently occupies a capacity slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Joined,
    Cancelled,
}

/// At most one row exists per (user, activity) pair, whatever the status.
/// A cancelled row is reactivated in place on re-join instead of inserting
/// a second row, so the storage uniqueness constraint on the pair holds.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RegistrationRow {
    pub registration_id: String,
    pub user_id: String,
    pub activity_id: String,
    pub status: RegistrationStatus,
    pub registered_at: String,
}
