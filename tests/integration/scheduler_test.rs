use crate::common::{init, ms, RecordingEventPublisher};
use notification_bus_lib::{
    domain::{BusEvent, Scheduler},
    NotificationBus, TokioScheduler, ToastRequest,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[tokio::test(start_paused = true)]
async fn test_tokio_bus_expires_and_dismisses() {
    init();
    let bus = NotificationBus::builder().build().unwrap();

    let kept = bus.show_toast(ToastRequest::info("kept").with_duration(ms(1000)));
    let dismissed = bus.show_toast(ToastRequest::info("dismissed").with_duration(ms(1000)));

    tokio::time::sleep(ms(10)).await;
    assert!(bus.dismiss_toast(dismissed));
    assert_eq!(bus.toasts().len(), 1);
    assert_eq!(bus.toasts()[0].id, kept);

    tokio::time::sleep(ms(1000)).await;
    tokio::task::yield_now().await;
    assert!(bus.toasts().is_empty());
    assert!(!bus.dismiss_toast(dismissed));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_default_duration() {
    init();
    let bus = NotificationBus::builder().build().unwrap();
    bus.show_toast(ToastRequest::error("Could not reach server"));

    tokio::time::sleep(ms(4990)).await;
    assert_eq!(bus.toasts().len(), 1);

    tokio::time::sleep(ms(20)).await;
    tokio::task::yield_now().await;
    assert!(bus.toasts().is_empty());
}

/// Timers on worker threads racing dismissals from other tasks: every toast
/// is removed exactly once, by whichever side got there first.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dismiss_and_expiry_remove_once() {
    init();
    let scheduler = Arc::new(TokioScheduler::current().unwrap());
    let events = RecordingEventPublisher::new();
    let bus = NotificationBus::builder()
        .scheduler(scheduler.clone())
        .publisher(Arc::new(events.clone()))
        .build()
        .unwrap();

    let ids: Vec<Uuid> = (0..200u64)
        .map(|i| bus.show_toast(ToastRequest::info(format!("t{i}")).with_duration(ms(i % 5))))
        .collect();

    let mut dismissers = Vec::new();
    for chunk in ids.chunks(25) {
        let bus = bus.clone();
        let chunk = chunk.to_vec();
        dismissers.push(tokio::spawn(async move {
            for id in chunk {
                bus.dismiss_toast(id);
                tokio::task::yield_now().await;
            }
        }));
    }
    for task in dismissers {
        task.await.unwrap();
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while scheduler.pending() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(ms(5)).await;
    }
    tokio::time::sleep(ms(20)).await;

    assert!(bus.toasts().is_empty());
    assert_eq!(scheduler.pending(), 0);

    let mut removals: HashMap<Uuid, usize> = HashMap::new();
    for event in events.events() {
        match event {
            BusEvent::ToastDismissed { toast_id, .. } | BusEvent::ToastExpired { toast_id, .. } => {
                *removals.entry(toast_id).or_default() += 1;
            }
            _ => {}
        }
    }
    assert_eq!(removals.len(), ids.len());
    assert!(removals.values().all(|count| *count == 1));
}

/// Zero-duration timers fire on other workers while `show_toast` is still
/// returning; a toast's removal must never be announced before its arrival.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_toast_shown_precedes_its_expiry_across_workers() {
    init();
    let scheduler = Arc::new(TokioScheduler::current().unwrap());
    let events = RecordingEventPublisher::new();
    let bus = NotificationBus::builder()
        .scheduler(scheduler.clone())
        .publisher(Arc::new(events.clone()))
        .build()
        .unwrap();

    for i in 0..5000u32 {
        bus.show_toast(ToastRequest::success(format!("Saved {i}")).with_duration(Duration::ZERO));
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while (scheduler.pending() > 0 || !bus.toasts().is_empty())
        && tokio::time::Instant::now() < deadline
    {
        tokio::time::sleep(ms(5)).await;
    }
    assert!(bus.toasts().is_empty());

    let mut shown: HashSet<Uuid> = HashSet::new();
    let mut out_of_order = 0;
    for event in events.events() {
        match event {
            BusEvent::ToastShown { toast_id, .. } => {
                shown.insert(toast_id);
            }
            BusEvent::ToastExpired { toast_id, .. } if !shown.contains(&toast_id) => {
                out_of_order += 1;
            }
            _ => {}
        }
    }
    assert_eq!(shown.len(), 5000);
    assert_eq!(out_of_order, 0, "ToastExpired published before ToastShown");
    assert_eq!(events.events().len(), 10_000);
}
