use serde::Serialize;

use super::SkillLevel;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub name: String,
    pub declared_level: SkillLevel,
    /// Derived from peer feedback only; NULL until the first feedback lands.
    pub perceived_level: Option<SkillLevel>,
    pub matches_played: i64,
    pub created_at: String,
}
