use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::database::{activity_repo, feedback_repo, user_repo};
use crate::error::ServiceError;
use crate::models::{FeedbackRow, SkillLevel};
use crate::services::{is_unique_violation, now_iso};

/// Record one peer rating and recompute the target's perceived level.
///
/// The rating insert and the level recompute share one transaction: either
/// both land or neither does. The perceived level is always derived from
/// every feedback row the target has ever received, across all activities.
///
/// Self-feedback and feedback on activities that never finished are
/// accepted as-is.
pub async fn submit_feedback(
    pool: &SqlitePool,
    author_user_id: &str,
    target_user_id: &str,
    activity_id: &str,
    suggested_level: SkillLevel,
    comment: Option<&str>,
) -> Result<FeedbackRow, ServiceError> {
    let mut tx = pool.begin().await?;

    if user_repo::load_user_by_id(&mut *tx, target_user_id)
        .await?
        .is_none()
    {
        return Err(ServiceError::NotFound("user"));
    }
    if activity_repo::load_activity_by_id(&mut *tx, activity_id)
        .await?
        .is_none()
    {
        return Err(ServiceError::NotFound("activity"));
    }

    let feedback_id = Uuid::new_v4().to_string();
    let created_at = now_iso();
    let inserted = feedback_repo::insert_feedback(
        &mut *tx,
        feedback_repo::NewFeedback {
            feedback_id: &feedback_id,
            author_user_id,
            target_user_id,
            activity_id,
            suggested_level,
            comment,
            created_at: &created_at,
        },
    )
    .await;
    match inserted {
        Ok(()) => {}
        Err(e) if is_unique_violation(&e) => return Err(ServiceError::DuplicateFeedback),
        Err(e) => return Err(e.into()),
    }

    let received =
        feedback_repo::list_suggested_levels_for_target(&mut *tx, target_user_id).await?;
    let weights: Vec<i64> = received.iter().map(|level| level.weight()).collect();
    let perceived = SkillLevel::average_level(&weights);
    user_repo::set_perceived_level(&mut *tx, target_user_id, perceived).await?;

    tx.commit().await?;

    debug!(
        author_user_id,
        target_user_id,
        activity_id,
        perceived = ?perceived,
        "feedback recorded"
    );

    Ok(FeedbackRow {
        feedback_id,
        author_user_id: author_user_id.to_string(),
        target_user_id: target_user_id.to_string(),
        activity_id: activity_id.to_string(),
        suggested_level,
        comment: comment.map(str::to_string),
        created_at,
    })
}
