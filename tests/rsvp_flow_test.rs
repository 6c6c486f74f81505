//! Integration tests for the RSVP flow against a real database.
//!
//! These tests exercise the per-event transaction: capacity admission,
//! waitlisting, idempotent re-RSVP, cancellation, and FIFO promotion.
//! They run only when TEST_DATABASE_URL points at a reachable Postgres
//! instance and are skipped otherwise.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use gatherhub::database::DatabaseService;
use gatherhub::models::event::CreateEventRequest;
use gatherhub::models::participant::ParticipantStatus;
use gatherhub::models::user::CreateUserRequest;
use gatherhub::models::Event;
use gatherhub::services::rsvp::RsvpService;
use gatherhub::GatherHubError;

async fn test_db() -> Option<DatabaseService> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.ok()?;
    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    Some(DatabaseService::new(pool))
}

async fn create_user(db: &DatabaseService) -> Uuid {
    let user = db
        .users
        .create(CreateUserRequest {
            email: format!("{}@example.com", Uuid::new_v4()),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            profile_image: None,
            role: None,
        })
        .await
        .expect("create user");
    user.id
}

async fn create_event(db: &DatabaseService, capacity: Option<i32>, published: bool) -> Event {
    db.events
        .create(CreateEventRequest {
            title: "Community meetup".to_string(),
            description: None,
            date: Utc::now() + Duration::days(7),
            rsvp_deadline: None,
            capacity,
            is_published: Some(published),
            is_online: Some(false),
            location: Some("Main hall".to_string()),
            price_cents: None,
            organizer_user_id: None,
        })
        .await
        .expect("create event")
}

#[tokio::test]
async fn sequential_rsvps_fill_capacity_then_waitlist() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let event = create_event(&db, Some(2), true).await;

    let first = create_user(&db).await;
    let second = create_user(&db).await;
    let third = create_user(&db).await;

    let outcome = service.rsvp(first, event.id).await.expect("first rsvp");
    assert_eq!(outcome.participant.status, ParticipantStatus::Going.as_str());
    assert!(!outcome.waitlisted);

    let outcome = service.rsvp(second, event.id).await.expect("second rsvp");
    assert_eq!(outcome.participant.status, ParticipantStatus::Going.as_str());

    let outcome = service.rsvp(third, event.id).await.expect("third rsvp");
    assert_eq!(outcome.participant.status, ParticipantStatus::Waitlisted.as_str());
    assert!(outcome.waitlisted);
    assert!(outcome.notice().is_some());

    assert_eq!(service.going_count(event.id).await.unwrap(), 2);
}

#[tokio::test]
async fn rsvp_is_idempotent_per_user() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let event = create_event(&db, Some(1), true).await;
    let user = create_user(&db).await;

    let first = service.rsvp(user, event.id).await.expect("rsvp");
    let second = service.rsvp(user, event.id).await.expect("repeat rsvp");

    // Same record, still going, not displaced onto the waitlist
    assert_eq!(first.participant.id, second.participant.id);
    assert_eq!(second.participant.status, ParticipantStatus::Going.as_str());

    let participants = service.list_participants(event.id).await.unwrap();
    assert_eq!(participants.len(), 1);
}

#[tokio::test]
async fn cancel_frees_slot_and_promotes_oldest_waitlisted() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let event = create_event(&db, Some(1), true).await;

    let holder = create_user(&db).await;
    let first_waiting = create_user(&db).await;
    let second_waiting = create_user(&db).await;

    service.rsvp(holder, event.id).await.expect("holder rsvp");
    service.rsvp(first_waiting, event.id).await.expect("first waitlist");
    service.rsvp(second_waiting, event.id).await.expect("second waitlist");

    let outcome = service.cancel(holder, event.id).await.expect("cancel");
    let promoted = outcome.promoted.expect("freed slot promotes");
    assert_eq!(promoted.user_id, first_waiting);
    assert_eq!(promoted.status, ParticipantStatus::Going.as_str());

    assert_eq!(service.going_count(event.id).await.unwrap(), 1);
}

#[tokio::test]
async fn cancelled_slot_is_reusable_by_new_rsvp() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let event = create_event(&db, Some(1), true).await;

    let holder = create_user(&db).await;
    let newcomer = create_user(&db).await;

    service.rsvp(holder, event.id).await.expect("holder rsvp");
    service.cancel(holder, event.id).await.expect("cancel");

    let outcome = service.rsvp(newcomer, event.id).await.expect("newcomer rsvp");
    assert_eq!(outcome.participant.status, ParticipantStatus::Going.as_str());
}

#[tokio::test]
async fn unlimited_capacity_admits_everyone() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let event = create_event(&db, None, true).await;

    for _ in 0..20 {
        let user = create_user(&db).await;
        let outcome = service.rsvp(user, event.id).await.expect("rsvp");
        assert_eq!(outcome.participant.status, ParticipantStatus::Going.as_str());
    }

    assert_eq!(service.going_count(event.id).await.unwrap(), 20);
}

#[tokio::test]
async fn concurrent_rsvps_never_exceed_capacity() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let capacity = 3;
    let event = create_event(&db, Some(capacity), true).await;

    let mut users = Vec::new();
    for _ in 0..10 {
        users.push(create_user(&db).await);
    }

    let mut handles = Vec::new();
    for user in users {
        let service = service.clone();
        let event_id = event.id;
        handles.push(tokio::spawn(async move { service.rsvp(user, event_id).await }));
    }

    let mut going = 0;
    let mut waitlisted = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().expect("rsvp");
        if outcome.waitlisted {
            waitlisted += 1;
        } else {
            going += 1;
        }
    }

    assert_eq!(going, capacity as usize);
    assert_eq!(waitlisted, 10 - capacity as usize);
    assert_eq!(service.going_count(event.id).await.unwrap(), i64::from(capacity));
}

#[tokio::test]
async fn unpublished_event_rejects_rsvp_without_creating_record() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let event = create_event(&db, Some(5), false).await;
    let user = create_user(&db).await;

    let err = service.rsvp(user, event.id).await.unwrap_err();
    assert_matches!(err, GatherHubError::EventNotAvailable);

    let record = db
        .participants
        .find_by_event_and_user(event.id, user)
        .await
        .unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn cancel_without_rsvp_is_not_registered() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let event = create_event(&db, Some(5), true).await;
    let user = create_user(&db).await;

    let err = service.cancel(user, event.id).await.unwrap_err();
    assert_matches!(err, GatherHubError::NotRegistered { .. });
}

#[tokio::test]
async fn rsvp_against_missing_event_is_not_found() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let user = create_user(&db).await;

    let err = service.rsvp(user, Uuid::new_v4()).await.unwrap_err();
    assert_matches!(err, GatherHubError::EventNotFound { .. });
}

#[tokio::test]
async fn past_deadline_rejects_rsvp() {
    let Some(db) = test_db().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let service = RsvpService::new(db.clone());
    let event = db
        .events
        .create(CreateEventRequest {
            title: "Closed registration".to_string(),
            description: None,
            date: Utc::now() + Duration::days(7),
            rsvp_deadline: Some(Utc::now() - Duration::hours(1)),
            capacity: None,
            is_published: Some(true),
            is_online: Some(false),
            location: None,
            price_cents: None,
            organizer_user_id: None,
        })
        .await
        .expect("create event");
    let user = create_user(&db).await;

    let err = service.rsvp(user, event.id).await.unwrap_err();
    assert_matches!(err, GatherHubError::EventNotAvailable);
}
