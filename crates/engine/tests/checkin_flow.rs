//! End-to-end check-in flow against the SQLite store

use checkin_core::settings::{CHECKIN_ENABLED, CHECKIN_REWARD};
use checkin_core::{CheckinOutcome, CheckinRecord, CheckinRejection, CheckinStatus, Session, UserId};
use checkin_engine::{CheckinService, ManualClock, SessionProvider, HOME_ROUTE};
use checkin_persistence::{sqlite, Database, PageCache};
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;

struct Setup {
    db: Arc<Database>,
    cache: Arc<PageCache>,
    clock: Arc<ManualClock>,
    service: Arc<CheckinService>,
}

async fn setup() -> Setup {
    let db = Arc::new(Database::connect_in_memory().await.unwrap());
    let cache = Arc::new(PageCache::default());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
    ));
    let service = Arc::new(
        CheckinService::new(db.clone(), db.clone(), cache.clone()).with_clock(clock.clone()),
    );

    Setup {
        db,
        cache,
        clock,
        service,
    }
}

async fn login(db: &Database, user: &str) -> Session {
    let user_id = UserId::new(user);
    sqlite::create_user(db.pool(), &user_id, Some(user)).await.unwrap();
    let token = sqlite::create_session(db.pool(), &user_id, Duration::hours(1))
        .await
        .unwrap();
    db.resolve_session(&token, Utc::now()).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_daily_checkin_over_sqlite() {
    let s = setup().await;
    let alice = login(&s.db, "alice").await;
    sqlite::set_setting(s.db.pool(), CHECKIN_REWARD, "15").await.unwrap();

    s.cache.insert(HOME_ROUTE, "alice", json!({"points": 0}));

    assert_eq!(
        s.service.check_in(Some(&alice)).await,
        CheckinOutcome::CheckedIn {
            reward: 15,
            consecutive_days: 1
        }
    );
    assert!(s.cache.get(HOME_ROUTE, "alice").is_none());
    assert_eq!(s.service.user_points(Some(&alice)).await, 15);
    assert_eq!(s.service.checkin_status(Some(&alice)).await, CheckinStatus::checked_in(true));

    // Rejected attempts leave the cache alone
    s.cache.insert(HOME_ROUTE, "alice", json!({"points": 15}));
    assert_eq!(
        s.service.check_in(Some(&alice)).await,
        CheckinOutcome::Rejected(CheckinRejection::AlreadyCheckedIn)
    );
    assert!(s.cache.get(HOME_ROUTE, "alice").is_some());

    s.clock.advance(Duration::days(1));
    assert_eq!(s.service.checkin_status(Some(&alice)).await, CheckinStatus::checked_in(false));
    assert_eq!(
        s.service.check_in(Some(&alice)).await,
        CheckinOutcome::CheckedIn {
            reward: 15,
            consecutive_days: 2
        }
    );
    assert_eq!(s.service.user_points(Some(&alice)).await, 30);
}

#[tokio::test]
async fn test_streak_scenarios_over_sqlite() {
    let s = setup().await;
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();

    let yesterday_user = login(&s.db, "carol").await;
    sqlite::save_checkin_record(
        s.db.pool(),
        &CheckinRecord {
            user_id: yesterday_user.user_id.clone(),
            points: Some(40),
            last_checkin_at: Some(now - Duration::days(1)),
            consecutive_days: Some(4),
        },
    )
    .await
    .unwrap();

    let lapsed_user = login(&s.db, "dave").await;
    sqlite::save_checkin_record(
        s.db.pool(),
        &CheckinRecord {
            user_id: lapsed_user.user_id.clone(),
            points: Some(70),
            last_checkin_at: Some(now - Duration::days(3)),
            consecutive_days: Some(7),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        s.service.check_in(Some(&yesterday_user)).await,
        CheckinOutcome::CheckedIn {
            reward: 10,
            consecutive_days: 5
        }
    );
    assert_eq!(
        s.service.check_in(Some(&lapsed_user)).await,
        CheckinOutcome::CheckedIn {
            reward: 10,
            consecutive_days: 1
        }
    );
    assert_eq!(s.service.user_points(Some(&yesterday_user)).await, 50);
    assert_eq!(s.service.user_points(Some(&lapsed_user)).await, 80);
}

#[tokio::test]
async fn test_disabled_over_sqlite() {
    let s = setup().await;
    let erin = login(&s.db, "erin").await;
    sqlite::set_setting(s.db.pool(), CHECKIN_ENABLED, "false").await.unwrap();

    assert_eq!(
        s.service.check_in(Some(&erin)).await,
        CheckinOutcome::Rejected(CheckinRejection::Disabled)
    );
    assert_eq!(s.service.checkin_status(Some(&erin)).await, CheckinStatus::disabled());
    assert_eq!(s.service.user_points(Some(&erin)).await, 0);
}

#[tokio::test]
async fn test_concurrent_checkins_award_once() {
    let s = setup().await;
    let frank = login(&s.db, "frank").await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = s.service.clone();
        let session = frank.clone();
        handles.push(tokio::spawn(async move {
            service.check_in(Some(&session)).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            CheckinOutcome::CheckedIn { .. } => successes += 1,
            CheckinOutcome::Rejected(rejection) => {
                assert_eq!(rejection, CheckinRejection::AlreadyCheckedIn)
            }
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(s.service.user_points(Some(&frank)).await, 10);
}
