use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{activity_repo, feedback_repo, registration_repo, user_repo};
use crate::error::ServiceError;
use crate::models::{RegistrationRow, RegistrationStatus, ACTIVITY_CAPACITY};
use crate::notifications::{LifecycleEvent, NotificationSink};
use crate::services::lifecycle_service;
use crate::services::{is_unique_violation, now_iso};

/// Sign a user up for an activity.
///
/// Capacity and pair uniqueness are enforced by the write statements
/// themselves, not by a prior read, so two concurrent joins cannot both
/// squeeze into the last slot. When the guarded write loses, committed
/// state decides which error the caller sees.
///
/// A successful join re-evaluates promotion inside the same transaction;
/// the Confirmed notification fires only after commit.
pub async fn join_activity(
    pool: &SqlitePool,
    sink: &dyn NotificationSink,
    user_id: &str,
    activity_id: &str,
) -> Result<RegistrationRow, ServiceError> {
    let mut tx = pool.begin().await?;

    if user_repo::load_user_by_id(&mut *tx, user_id).await?.is_none() {
        return Err(ServiceError::NotFound("user"));
    }
    if activity_repo::load_activity_by_id(&mut *tx, activity_id)
        .await?
        .is_none()
    {
        return Err(ServiceError::NotFound("activity"));
    }

    match registration_repo::find_by_pair(&mut *tx, user_id, activity_id).await? {
        Some(existing) if existing.status == RegistrationStatus::Joined => {
            return Err(ServiceError::AlreadyRegistered);
        }
        Some(existing) => {
            // Cancelled row for this pair: reactivate it in place.
            let changed = registration_repo::reactivate_guarded(
                &mut *tx,
                &existing.registration_id,
                activity_id,
                &now_iso(),
                ACTIVITY_CAPACITY,
            )
            .await?;
            if changed == 0 {
                return Err(classify_lost_join(&mut tx, user_id, activity_id).await?);
            }
        }
        None => {
            let registration_id = Uuid::new_v4().to_string();
            let inserted = registration_repo::insert_joined_guarded(
                &mut *tx,
                &registration_id,
                user_id,
                activity_id,
                &now_iso(),
                ACTIVITY_CAPACITY,
            )
            .await;
            match inserted {
                Ok(0) => {
                    return Err(classify_lost_join(&mut tx, user_id, activity_id).await?);
                }
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    // Another join for the same pair landed between our
                    // lookup and the insert.
                    return Err(ServiceError::AlreadyRegistered);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    let promoted = lifecycle_service::evaluate_promotion(&mut *tx, activity_id).await?;

    let registration = registration_repo::find_by_pair(&mut *tx, user_id, activity_id)
        .await?
        .ok_or(ServiceError::NotFound("registration"))?;

    tx.commit().await?;

    debug!(user_id, activity_id, "registration joined");
    if promoted {
        info!(activity_id, "activity confirmed");
        sink.notify(LifecycleEvent::Confirmed, activity_id);
    }

    Ok(registration)
}

/// A guarded write changed nothing: either the activity filled up, or a
/// concurrent join already claimed this pair. Current state tells the two
/// apart.
async fn classify_lost_join(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: &str,
    activity_id: &str,
) -> Result<ServiceError, ServiceError> {
    let current = registration_repo::find_by_pair(&mut **tx, user_id, activity_id).await?;
    if matches!(current, Some(r) if r.status == RegistrationStatus::Joined) {
        return Ok(ServiceError::AlreadyRegistered);
    }
    Ok(ServiceError::ActivityFull)
}

/// Take a user out of an activity.
///
/// The creator branch comes first and needs no registration of its own:
/// a creator leaving dissolves the whole activity, cascading to every
/// registration and all feedback, whatever the activity's status. Anyone
/// else just flips their own row to cancelled; the activity keeps its
/// status even if the joined count drops below capacity again.
pub async fn leave_activity(
    pool: &SqlitePool,
    user_id: &str,
    activity_id: &str,
) -> Result<(), ServiceError> {
    let mut tx = pool.begin().await?;

    let Some(activity) = activity_repo::load_activity_by_id(&mut *tx, activity_id).await? else {
        return Err(ServiceError::NotFound("activity"));
    };

    if activity.creator_user_id.as_deref() == Some(user_id) {
        feedback_repo::delete_for_activity(&mut *tx, activity_id).await?;
        registration_repo::delete_for_activity(&mut *tx, activity_id).await?;
        activity_repo::delete_activity(&mut *tx, activity_id).await?;
        tx.commit().await?;
        info!(activity_id, user_id, "activity deleted by its creator");
        return Ok(());
    }

    let Some(registration) =
        registration_repo::find_by_pair(&mut *tx, user_id, activity_id).await?
    else {
        return Err(ServiceError::NotRegistered);
    };
    if registration.status == RegistrationStatus::Cancelled {
        return Err(ServiceError::AlreadyLeft);
    }

    let changed =
        registration_repo::cancel_registration(&mut *tx, &registration.registration_id).await?;
    if changed == 0 {
        // A concurrent leave got there first.
        return Err(ServiceError::AlreadyLeft);
    }

    tx.commit().await?;
    debug!(user_id, activity_id, "registration cancelled");
    Ok(())
}
