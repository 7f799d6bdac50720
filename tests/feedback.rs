mod common;

use matchup::error::ServiceError;
use matchup::models::{ActivityStatus, SkillLevel};
use matchup::notifications::{LifecycleEvent, MemorySink};
use matchup::services::{
    activities_service, feedback_service, lifecycle_service, registration_service, user_service,
};

use common::{create_fixed_activity, create_user, joined_count, test_pool};

async fn fill_activity(
    pool: &sqlx::SqlitePool,
    sink: &MemorySink,
    activity_id: &str,
    names: [&str; 4],
) -> Vec<String> {
    let mut user_ids = Vec::new();
    for name in names {
        let user = create_user(pool, name).await;
        registration_service::join_activity(pool, sink, &user.user_id, activity_id)
            .await
            .expect("join");
        user_ids.push(user.user_id);
    }
    user_ids
}

#[tokio::test]
async fn finish_only_works_once_and_only_when_confirmed() {
    let pool = test_pool().await;
    let sink = MemorySink::new();
    let activity = create_fixed_activity(&pool, "2026-09-01T18:00:00.000000").await;

    let err = lifecycle_service::finish_activity(&pool, &sink, &activity.activity_id)
        .await
        .expect_err("waiting activity cannot finish");
    assert!(matches!(err, ServiceError::InvalidTransition));

    fill_activity(&pool, &sink, &activity.activity_id, ["ada", "ben", "cas", "dot"]).await;

    lifecycle_service::finish_activity(&pool, &sink, &activity.activity_id)
        .await
        .expect("finish confirmed activity");
    let row = activities_service::get_activity(&pool, &activity.activity_id)
        .await
        .expect("get");
    assert_eq!(row.status, ActivityStatus::Finished);

    let err = lifecycle_service::finish_activity(&pool, &sink, &activity.activity_id)
        .await
        .expect_err("second finish must fail");
    assert!(matches!(err, ServiceError::InvalidTransition));

    let err = lifecycle_service::finish_activity(&pool, &sink, "no-such-activity")
        .await
        .expect_err("unknown id");
    assert!(matches!(err, ServiceError::InvalidTransition));

    let finished: Vec<_> = sink
        .events()
        .into_iter()
        .filter(|(event, _)| *event == LifecycleEvent::Finished)
        .collect();
    assert_eq!(
        finished,
        vec![(LifecycleEvent::Finished, activity.activity_id.clone())]
    );
}

#[tokio::test]
async fn finish_bumps_played_counter_for_joined_participants_only() {
    let pool = test_pool().await;
    let sink = MemorySink::new();
    let activity = create_fixed_activity(&pool, "2026-09-01T18:00:00.000000").await;
    let user_ids = fill_activity(&pool, &sink, &activity.activity_id, ["ada", "ben", "cas", "dot"]).await;

    // One participant bails after confirmation; their counter must not move.
    registration_service::leave_activity(&pool, &user_ids[3], &activity.activity_id)
        .await
        .expect("leave");

    lifecycle_service::finish_activity(&pool, &sink, &activity.activity_id)
        .await
        .expect("finish");

    for user_id in &user_ids[..3] {
        let user = user_service::get_user(&pool, user_id).await.expect("get");
        assert_eq!(user.matches_played, 1);
    }
    let left = user_service::get_user(&pool, &user_ids[3]).await.expect("get");
    assert_eq!(left.matches_played, 0);
}

#[tokio::test]
async fn sweep_finishes_only_overdue_confirmed_activities() {
    let pool = test_pool().await;
    let sink = MemorySink::new();

    let overdue = create_fixed_activity(&pool, "2026-01-10T18:00:00.000000").await;
    fill_activity(&pool, &sink, &overdue.activity_id, ["ada", "ben", "cas", "dot"]).await;

    let upcoming = create_fixed_activity(&pool, "2026-12-10T18:00:00.000000").await;
    fill_activity(&pool, &sink, &upcoming.activity_id, ["eli", "fay", "gus", "hal"]).await;

    // Overdue but never confirmed: the sweep must not touch it.
    let stale_waiting = create_fixed_activity(&pool, "2026-01-05T18:00:00.000000").await;

    let report = lifecycle_service::finish_overdue(&pool, &sink, "2026-06-01T00:00:00.000000")
        .await
        .expect("sweep");
    assert_eq!(report.candidates, 1);
    assert_eq!(report.finished, 1);

    let row = activities_service::get_activity(&pool, &overdue.activity_id)
        .await
        .expect("get");
    assert_eq!(row.status, ActivityStatus::Finished);
    let row = activities_service::get_activity(&pool, &upcoming.activity_id)
        .await
        .expect("get");
    assert_eq!(row.status, ActivityStatus::Confirmed);
    let row = activities_service::get_activity(&pool, &stale_waiting.activity_id)
        .await
        .expect("get");
    assert_eq!(row.status, ActivityStatus::Waiting);

    let finished: Vec<_> = sink
        .events()
        .into_iter()
        .filter(|(event, _)| *event == LifecycleEvent::Finished)
        .collect();
    assert_eq!(
        finished,
        vec![(LifecycleEvent::Finished, overdue.activity_id.clone())]
    );
}

#[tokio::test]
async fn perceived_level_starts_empty_and_follows_the_mean() {
    let pool = test_pool().await;
    let activity = create_fixed_activity(&pool, "2026-09-01T18:00:00.000000").await;
    let target = create_user(&pool, "tess").await;
    assert_eq!(target.perceived_level, None);

    let ada = create_user(&pool, "ada").await;
    let ben = create_user(&pool, "ben").await;
    let cas = create_user(&pool, "cas").await;

    // Beginner, Intermediate, Intermediate: mean 0.667 lands on Intermediate.
    feedback_service::submit_feedback(
        &pool,
        &ada.user_id,
        &target.user_id,
        &activity.activity_id,
        SkillLevel::Beginner,
        None,
    )
    .await
    .expect("feedback");
    feedback_service::submit_feedback(
        &pool,
        &ben.user_id,
        &target.user_id,
        &activity.activity_id,
        SkillLevel::Intermediate,
        Some("solid positioning"),
    )
    .await
    .expect("feedback");
    feedback_service::submit_feedback(
        &pool,
        &cas.user_id,
        &target.user_id,
        &activity.activity_id,
        SkillLevel::Intermediate,
        None,
    )
    .await
    .expect("feedback");

    let user = user_service::get_user(&pool, &target.user_id).await.expect("get");
    assert_eq!(user.perceived_level, Some(SkillLevel::Intermediate));
}

#[tokio::test]
async fn perceived_level_half_rounds_up_across_activities() {
    let pool = test_pool().await;
    let first = create_fixed_activity(&pool, "2026-09-01T18:00:00.000000").await;
    let second = create_fixed_activity(&pool, "2026-09-08T18:00:00.000000").await;
    let target = create_user(&pool, "tess").await;
    let ada = create_user(&pool, "ada").await;
    let ben = create_user(&pool, "ben").await;

    // Advanced and Professional: mean 2.5 rounds up to Professional.
    feedback_service::submit_feedback(
        &pool,
        &ada.user_id,
        &target.user_id,
        &first.activity_id,
        SkillLevel::Advanced,
        None,
    )
    .await
    .expect("feedback");
    feedback_service::submit_feedback(
        &pool,
        &ben.user_id,
        &target.user_id,
        &second.activity_id,
        SkillLevel::Professional,
        None,
    )
    .await
    .expect("feedback");

    let user = user_service::get_user(&pool, &target.user_id).await.expect("get");
    assert_eq!(user.perceived_level, Some(SkillLevel::Professional));
}

#[tokio::test]
async fn duplicate_feedback_is_rejected_and_changes_nothing() {
    let pool = test_pool().await;
    let activity = create_fixed_activity(&pool, "2026-09-01T18:00:00.000000").await;
    let target = create_user(&pool, "tess").await;
    let ada = create_user(&pool, "ada").await;

    feedback_service::submit_feedback(
        &pool,
        &ada.user_id,
        &target.user_id,
        &activity.activity_id,
        SkillLevel::Advanced,
        None,
    )
    .await
    .expect("feedback");

    let err = feedback_service::submit_feedback(
        &pool,
        &ada.user_id,
        &target.user_id,
        &activity.activity_id,
        SkillLevel::Beginner,
        None,
    )
    .await
    .expect_err("same (author, target, activity) must fail");
    assert!(matches!(err, ServiceError::DuplicateFeedback));

    let user = user_service::get_user(&pool, &target.user_id).await.expect("get");
    assert_eq!(user.perceived_level, Some(SkillLevel::Advanced));
}

#[tokio::test]
async fn feedback_requires_existing_target_and_activity() {
    let pool = test_pool().await;
    let activity = create_fixed_activity(&pool, "2026-09-01T18:00:00.000000").await;
    let ada = create_user(&pool, "ada").await;

    let err = feedback_service::submit_feedback(
        &pool,
        &ada.user_id,
        "no-such-user",
        &activity.activity_id,
        SkillLevel::Advanced,
        None,
    )
    .await
    .expect_err("unknown target");
    assert!(matches!(err, ServiceError::NotFound("user")));

    let err = feedback_service::submit_feedback(
        &pool,
        &ada.user_id,
        &ada.user_id,
        "no-such-activity",
        SkillLevel::Advanced,
        None,
    )
    .await
    .expect_err("unknown activity");
    assert!(matches!(err, ServiceError::NotFound("activity")));
}

#[tokio::test]
async fn creator_leave_takes_received_feedback_with_it() {
    let pool = test_pool().await;
    let creator = create_user(&pool, "carol").await;
    let activity = activities_service::create_activity(
        &pool,
        activities_service::NewActivity {
            activity_type: matchup::models::ActivityType::Proposed,
            required_level: SkillLevel::Intermediate,
            scheduled_at: "2026-09-01T18:00:00.000000".to_string(),
            location: "Court 3".to_string(),
            creator_user_id: Some(creator.user_id.clone()),
        },
    )
    .await
    .expect("create");

    let target = create_user(&pool, "tess").await;
    let ada = create_user(&pool, "ada").await;
    feedback_service::submit_feedback(
        &pool,
        &ada.user_id,
        &target.user_id,
        &activity.activity_id,
        SkillLevel::Professional,
        None,
    )
    .await
    .expect("feedback");

    registration_service::leave_activity(&pool, &creator.user_id, &activity.activity_id)
        .await
        .expect("creator leave");

    // The feedback rows are gone with the activity; the perceived level is
    // not recomputed by the cascade and keeps its last written value.
    let levels = matchup::database::feedback_repo::list_suggested_levels_for_target(
        &pool,
        &target.user_id,
    )
    .await
    .expect("list");
    assert!(levels.is_empty());

    let user = user_service::get_user(&pool, &target.user_id).await.expect("get");
    assert_eq!(user.perceived_level, Some(SkillLevel::Professional));
    assert_eq!(joined_count(&pool, &activity.activity_id).await, 0);
}
