use std::cmp::Ordering;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{activity_repo, user_repo};
use crate::error::ServiceError;
use crate::models::{ActivityListRow, ActivityRow, ActivityStatus, ActivityType, SkillLevel};
use crate::services::now_iso;

pub struct NewActivity {
    pub activity_type: ActivityType,
    pub required_level: SkillLevel,
    pub scheduled_at: String,
    pub location: String,
    /// Fixed-schedule slots have no creator; proposed activities do.
    pub creator_user_id: Option<String>,
}

pub async fn create_activity(
    pool: &SqlitePool,
    new: NewActivity,
) -> Result<ActivityRow, ServiceError> {
    if let Some(creator) = new.creator_user_id.as_deref() {
        if user_repo::load_user_by_id(pool, creator).await?.is_none() {
            return Err(ServiceError::NotFound("user"));
        }
    }

    let activity_id = Uuid::new_v4().to_string();
    let created_at = now_iso();
    activity_repo::insert_activity(
        pool,
        activity_repo::NewActivityRow {
            activity_id: &activity_id,
            activity_type: new.activity_type,
            required_level: new.required_level,
            scheduled_at: &new.scheduled_at,
            location: &new.location,
            creator_user_id: new.creator_user_id.as_deref(),
            created_at: &created_at,
        },
    )
    .await?;

    Ok(ActivityRow {
        activity_id,
        activity_type: new.activity_type,
        status: ActivityStatus::Waiting,
        required_level: new.required_level,
        scheduled_at: new.scheduled_at,
        location: new.location,
        creator_user_id: new.creator_user_id,
        created_at,
    })
}

pub async fn get_activity(
    pool: &SqlitePool,
    activity_id: &str,
) -> Result<ActivityRow, ServiceError> {
    activity_repo::load_activity_by_id(pool, activity_id)
        .await?
        .ok_or(ServiceError::NotFound("activity"))
}

/// Closed set of list orders; each maps to one pure comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySort {
    ByDate,
    ByPopularity,
    ByLevel,
}

impl ActivitySort {
    pub fn parse(input: Option<&str>) -> ActivitySort {
        match input.unwrap_or("by_date") {
            "by_popularity" => ActivitySort::ByPopularity,
            "by_level" => ActivitySort::ByLevel,
            _ => ActivitySort::ByDate,
        }
    }

    fn comparator(self) -> fn(&ActivityListRow, &ActivityListRow) -> Ordering {
        match self {
            ActivitySort::ByDate => |a, b| a.scheduled_at.cmp(&b.scheduled_at),
            ActivitySort::ByPopularity => |a, b| {
                b.joined_count
                    .cmp(&a.joined_count)
                    .then_with(|| a.scheduled_at.cmp(&b.scheduled_at))
            },
            ActivitySort::ByLevel => |a, b| {
                a.required_level
                    .weight()
                    .cmp(&b.required_level.weight())
                    .then_with(|| a.scheduled_at.cmp(&b.scheduled_at))
            },
        }
    }
}

pub async fn list_activities(
    pool: &SqlitePool,
    sort: ActivitySort,
    level_filter: Option<SkillLevel>,
) -> Result<Vec<ActivityListRow>, ServiceError> {
    let mut rows = activity_repo::list_activities_with_counts(pool).await?;

    if let Some(level) = level_filter {
        rows.retain(|row| row.required_level == level);
    }
    rows.sort_by(sort.comparator());

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityStatus, ActivityType};

    fn row(id: &str, scheduled_at: &str, level: SkillLevel, joined: i64) -> ActivityListRow {
        ActivityListRow {
            activity_id: id.to_string(),
            activity_type: ActivityType::Proposed,
            status: ActivityStatus::Waiting,
            required_level: level,
            scheduled_at: scheduled_at.to_string(),
            location: "Court 1".to_string(),
            creator_user_id: None,
            created_at: scheduled_at.to_string(),
            joined_count: joined,
        }
    }

    fn ids(rows: &[ActivityListRow]) -> Vec<&str> {
        rows.iter().map(|r| r.activity_id.as_str()).collect()
    }

    #[test]
    fn parse_defaults_to_date_order() {
        assert_eq!(ActivitySort::parse(None), ActivitySort::ByDate);
        assert_eq!(ActivitySort::parse(Some("nonsense")), ActivitySort::ByDate);
        assert_eq!(
            ActivitySort::parse(Some("by_popularity")),
            ActivitySort::ByPopularity
        );
        assert_eq!(ActivitySort::parse(Some("by_level")), ActivitySort::ByLevel);
    }

    #[test]
    fn by_date_orders_soonest_first() {
        let mut rows = vec![
            row("b", "2026-09-02T18:00:00", SkillLevel::Beginner, 1),
            row("a", "2026-09-01T18:00:00", SkillLevel::Advanced, 4),
        ];
        rows.sort_by(ActivitySort::ByDate.comparator());
        assert_eq!(ids(&rows), vec!["a", "b"]);
    }

    #[test]
    fn by_popularity_orders_fullest_first() {
        let mut rows = vec![
            row("a", "2026-09-01T18:00:00", SkillLevel::Beginner, 1),
            row("b", "2026-09-02T18:00:00", SkillLevel::Beginner, 3),
            row("c", "2026-09-03T18:00:00", SkillLevel::Beginner, 3),
        ];
        rows.sort_by(ActivitySort::ByPopularity.comparator());
        // Equal counts fall back to date order.
        assert_eq!(ids(&rows), vec!["b", "c", "a"]);
    }

    #[test]
    fn by_level_orders_lightest_first() {
        let mut rows = vec![
            row("a", "2026-09-01T18:00:00", SkillLevel::Professional, 0),
            row("b", "2026-09-02T18:00:00", SkillLevel::Beginner, 0),
            row("c", "2026-09-03T18:00:00", SkillLevel::Intermediate, 0),
        ];
        rows.sort_by(ActivitySort::ByLevel.comparator());
        assert_eq!(ids(&rows), vec!["b", "c", "a"]);
    }
}
