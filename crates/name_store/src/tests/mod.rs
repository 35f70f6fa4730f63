
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tower::Service;

use crate::{
    config::StoreConfig,
    guardian::PurgeReport,
    store::{init_store, init_store_with_guardian},
};

fn init_tracing() {
    #[cfg(feature = "store_tracing")]
    crate::store_tracing::init();
}

#[tokio::test]
async fn integration_add_name_to_empty_store() {
    init_tracing();
    let (mut list, mut view) = init_store(&StoreConfig::default());

    assert_names!(list, []);
    assert_sorted_names!(view, []);
    add_name!(list, "1234");
    assert_names!(list, ["1234"]);
    assert_sorted_names!(view, ["1234"]);
}

#[tokio::test]
async fn integration_remove_name() {
    init_tracing();
    let (mut list, _) = init_store(&StoreConfig::default());

    add_name!(list, "1234");
    assert_names!(list, ["1234"]);
    remove_name!(list, "1234");
    assert_names!(list, []);
    remove_name!(list, "1234");
    assert_names!(list, []);
}

#[tokio::test]
async fn integration_sorted_names_do_not_touch_list_order() {
    init_tracing();
    let (mut list, mut view) = init_store(&StoreConfig::default());

    add_name!(list, "456");
    add_name!(list, "123");
    assert_names!(list, ["456", "123"]);
    assert_sorted_names!(view, ["123", "456"]);
    assert_names!(list, ["456", "123"]);
}

#[tokio::test]
async fn integration_length_tracks_adds_and_removals() {
    init_tracing();
    let (mut list, _) = init_store(&StoreConfig::default());

    for name in ["a", "b", "a", "c", "", "a"] {
        add_name!(list, name);
    }
    assert_eq!(list.names().len(), 6);
    remove_name!(list, "a");
    assert_names!(list, ["b", "c", ""]);
    remove_name!(list, "");
    assert_names!(list, ["b", "c"]);
}

#[tokio::test(start_paused = true)]
async fn integration_clear_all_removes_every_name() {
    init_tracing();
    let (mut list, mut view) = init_store(&StoreConfig::default());

    add_name!(list, "456");
    add_name!(list, "123");
    assert_names!(list, ["456", "123"]);

    let start = Instant::now();
    assert_eq!(clear_all!(view), 2);
    assert_names!(list, []);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(80) && elapsed < Duration::from_millis(85));
}

#[tokio::test(start_paused = true)]
async fn integration_clear_all_ignores_names_added_during_pass() {
    init_tracing();
    let (mut list, view) = init_store(&StoreConfig::default());

    add_name!(list, "a");
    add_name!(list, "b");
    let mut clearing = view.clone();
    let clear = tokio::spawn(async move { clear_all!(clearing) });

    // "b" is gone right away, "a" goes at 80ms
    sleep(Duration::from_millis(40)).await;
    assert_names!(list, ["a"]);
    add_name!(list, "late");

    assert_eq!(clear.await.unwrap(), 2);
    assert_names!(list, ["late"]);
}

#[tokio::test(start_paused = true)]
async fn integration_clear_all_skips_names_removed_elsewhere() {
    init_tracing();
    let (mut list, view) = init_store(&StoreConfig::default());

    for name in ["a", "b", "c"] {
        add_name!(list, name);
    }
    let mut clearing = view.clone();
    let clear = tokio::spawn(async move { clear_all!(clearing) });

    sleep(Duration::from_millis(40)).await;
    remove_name!(list, "a");

    assert_eq!(clear.await.unwrap(), 3);
    assert_names!(list, []);
}

#[tokio::test(start_paused = true)]
async fn integration_overlapping_clear_all_completes() {
    init_tracing();
    let (mut list, view) = init_store(&StoreConfig::default());

    for name in ["a", "b", "c"] {
        add_name!(list, name);
    }
    let (mut first, mut second) = (view.clone(), view.clone());
    let (first, second) = tokio::join!(
        async move { clear_all!(first) },
        async move { clear_all!(second) }
    );
    // The first pass removes "c" before the second one takes its snapshot
    assert_eq!((first, second), (3, 2));
    assert_names!(list, []);
}

#[tokio::test(start_paused = true)]
async fn integration_guardian_removes_names_containing_four() {
    init_tracing();
    let (mut list, mut view, guardian) =
        init_store_with_guardian(&StoreConfig::default()).await.unwrap();
    let mut reports = guardian.reports();

    add_name!(list, "1234");
    add_name!(list, "456");
    add_name!(list, "123");

    sleep(Duration::from_millis(399)).await;
    assert_names!(list, ["1234", "456", "123"]);

    assert_eq!(
        reports.recv().await.unwrap(),
        PurgeReport { removed: vec!["1234".to_string(), "456".to_string()] }
    );
    assert_names!(list, ["123"]);
    assert_sorted_names!(view, ["123"]);
}

#[tokio::test(start_paused = true)]
async fn integration_guardian_debounce_resets_on_each_change() {
    init_tracing();
    let (mut list, _, guardian) = init_store_with_guardian(&StoreConfig::default()).await.unwrap();
    let mut reports = guardian.reports();

    let start = Instant::now();
    add_name!(list, "4");
    for name in ["a", "b", "c"] {
        sleep(Duration::from_millis(300)).await;
        add_name!(list, name);
    }
    // Last change at 900ms, a single pass is expected at 1300ms
    sleep(Duration::from_millis(399)).await;
    assert_names!(list, ["4", "a", "b", "c"]);
    assert!(reports.try_recv().is_err());

    assert_eq!(reports.recv().await.unwrap(), PurgeReport { removed: vec!["4".to_string()] });
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1300) && elapsed < Duration::from_millis(1305));
    assert_names!(list, ["a", "b", "c"]);
}

#[tokio::test(start_paused = true)]
async fn integration_guardian_filters_latest_snapshot() {
    init_tracing();
    let (mut list, _, guardian) = init_store_with_guardian(&StoreConfig::default()).await.unwrap();
    let mut reports = guardian.reports();

    add_name!(list, "14");
    sleep(Duration::from_millis(100)).await;
    remove_name!(list, "14");
    add_name!(list, "24");

    assert_eq!(reports.recv().await.unwrap(), PurgeReport { removed: vec!["24".to_string()] });
    assert_names!(list, []);
}

#[tokio::test(start_paused = true)]
async fn integration_guardian_stops_once_store_is_dropped() {
    init_tracing();
    let (mut list, view, guardian) =
        init_store_with_guardian(&StoreConfig::default()).await.unwrap();
    let mut reports = guardian.reports();

    add_name!(list, "4");
    sleep(Duration::from_millis(100)).await;
    assert!(guardian.is_running());

    // The pending pass is discarded along with the list
    drop(list);
    drop(view);
    sleep(Duration::from_secs(5)).await;
    assert!(!guardian.is_running());
    assert!(reports.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn integration_guardian_and_clear_all_interleave() {
    init_tracing();
    let (mut list, mut view, guardian) =
        init_store_with_guardian(&StoreConfig::default()).await.unwrap();
    let mut reports = guardian.reports();

    for name in ["x4", "y", "z4"] {
        add_name!(list, name);
    }
    assert_eq!(clear_all!(view), 3);
    assert_names!(list, []);

    // The guardian sees the emptied list and finds nothing to remove
    assert_eq!(reports.recv().await.unwrap(), PurgeReport { removed: vec![] });
}
