use sqlx::{SqliteExecutor, SqlitePool};
use tracing::info;

use crate::database::{activity_repo, user_repo};
use crate::error::ServiceError;
use crate::models::ACTIVITY_CAPACITY;
use crate::notifications::{LifecycleEvent, NotificationSink};

/// waiting -> confirmed, re-evaluated after every successful join.
///
/// The conditional update flips at most once, so whichever join wins the
/// flip owes exactly one Confirmed notification. Runs on the joining
/// transaction; the caller notifies after commit.
pub async fn evaluate_promotion(
    executor: impl SqliteExecutor<'_>,
    activity_id: &str,
) -> sqlx::Result<bool> {
    let changed = activity_repo::promote_if_full(executor, activity_id, ACTIVITY_CAPACITY).await?;
    Ok(changed == 1)
}

/// confirmed -> finished, by explicit request.
///
/// Zero rows changed means the activity is missing, still waiting, or
/// already finished; all of those are the same refusal to the caller.
/// Participants still joined at this point get their played counter bumped
/// in the same transaction.
pub async fn finish_activity(
    pool: &SqlitePool,
    sink: &dyn NotificationSink,
    activity_id: &str,
) -> Result<(), ServiceError> {
    let mut tx = pool.begin().await?;

    let changed = activity_repo::finish_if_confirmed(&mut *tx, activity_id).await?;
    if changed == 0 {
        return Err(ServiceError::InvalidTransition);
    }
    user_repo::increment_matches_played_for_activity(&mut *tx, activity_id).await?;

    tx.commit().await?;

    info!(activity_id, "activity finished");
    sink.notify(LifecycleEvent::Finished, activity_id);
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SweepReport {
    pub candidates: usize,
    pub finished: usize,
}

/// Finish every confirmed activity whose scheduled time has passed.
///
/// A callable sweep, not a scheduler: each candidate goes through the same
/// conditional transition as a manual finish, all inside one transaction,
/// with notifications held back until after commit.
pub async fn finish_overdue(
    pool: &SqlitePool,
    sink: &dyn NotificationSink,
    now: &str,
) -> Result<SweepReport, ServiceError> {
    let mut tx = pool.begin().await?;

    let candidates = activity_repo::list_overdue_confirmed(&mut *tx, now).await?;
    let mut finished_ids = Vec::new();
    for activity_id in &candidates {
        if activity_repo::finish_if_confirmed(&mut *tx, activity_id).await? == 1 {
            user_repo::increment_matches_played_for_activity(&mut *tx, activity_id).await?;
            finished_ids.push(activity_id.clone());
        }
    }

    tx.commit().await?;

    for activity_id in &finished_ids {
        info!(activity_id, "activity finished by sweep");
        sink.notify(LifecycleEvent::Finished, activity_id);
    }

    Ok(SweepReport {
        candidates: candidates.len(),
        finished: finished_ids.len(),
    })
}
