use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use facturador::infrastructure::cache::ResponseCache;

#[test]
fn given_a_fresh_entry_when_reading_before_ttl_then_value_round_trips() {
    let cache = ResponseCache::new();
    cache.set("jobs", &vec![1, 2, 3], Some(Duration::from_secs(60)));

    assert_eq!(cache.get::<Vec<i32>>("jobs"), Some(vec![1, 2, 3]));
}

#[test]
fn given_an_expired_entry_when_reading_then_it_is_absent_and_evicted() {
    let cache = ResponseCache::new();
    cache.set("jobs", &"payload", Some(Duration::from_millis(20)));

    sleep(Duration::from_millis(40));

    assert_eq!(cache.get::<String>("jobs"), None);
    assert!(cache.is_empty());
}

#[test]
fn given_a_missing_key_when_reading_then_returns_none() {
    let cache = ResponseCache::new();
    assert_eq!(cache.get::<String>("nope"), None);
}

#[test]
fn given_targeted_clear_when_invalidating_then_only_that_key_is_dropped() {
    let cache = ResponseCache::new();
    cache.set("jobs", &1, None);
    cache.set("accounts", &2, None);

    cache.clear(Some("jobs"));

    assert_eq!(cache.get::<i32>("jobs"), None);
    assert_eq!(cache.get::<i32>("accounts"), Some(2));
}

#[test]
fn given_full_clear_when_invalidating_then_everything_is_dropped() {
    let cache = ResponseCache::new();
    cache.set("jobs", &1, None);
    cache.set("accounts", &2, None);

    cache.clear(None);

    assert!(cache.is_empty());
}

#[test]
fn given_mixed_entries_when_cleaning_up_then_only_expired_ones_are_swept() {
    let cache = ResponseCache::new();
    cache.set("stale", &1, Some(Duration::from_millis(20)));
    cache.set("fresh", &2, Some(Duration::from_secs(60)));

    sleep(Duration::from_millis(40));
    cache.cleanup();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get::<i32>("fresh"), Some(2));
}

#[tokio::test(start_paused = true)]
async fn given_a_spawned_sweeper_when_the_interval_elapses_then_expired_entries_are_swept() {
    let cache = Arc::new(ResponseCache::new());
    cache.set("stale", &1, Some(Duration::from_millis(10)));
    cache.set("fresh", &2, Some(Duration::from_secs(24 * 60 * 60)));
    let sweeper = cache.spawn_sweeper();
    tokio::task::yield_now().await;

    // Expiry runs on the wall clock; let the short TTL lapse for real
    // before driving the sweeper's timer forward.
    sleep(Duration::from_millis(30));
    tokio::time::advance(ResponseCache::SWEEP_INTERVAL + Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get::<i32>("fresh"), Some(2));

    // Once the last strong handle is gone the next tick ends the task.
    drop(cache);
    tokio::time::advance(ResponseCache::SWEEP_INTERVAL + Duration::from_secs(1)).await;
    sweeper.await.unwrap();
}

#[test]
fn given_overwritten_key_when_reading_then_latest_value_and_ttl_win() {
    let cache = ResponseCache::new();
    cache.set("jobs", &"old", Some(Duration::from_millis(20)));
    cache.set("jobs", &"new", Some(Duration::from_secs(60)));

    sleep(Duration::from_millis(40));

    assert_eq!(cache.get::<String>("jobs"), Some("new".to_string()));
}
