use crate::bus_test;
use crate::common::{create_test_bus, create_unread_seed, init, ms};
use notification_bus_lib::{
    context, BusConfig, DomainError, NewNotification, NotificationBus, ToastAction,
    ToastRequest, VirtualScheduler,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Stands in for a deeply nested view that never receives the bus by
/// parameter.
fn apply_to_job() {
    let bus = context::use_bus();
    bus.add_notification(
        NewNotification::new("success", "Application sent", "Acme Corp - Rust Engineer")
            .with_action("Track", "/applications"),
    );
    bus.show_toast(ToastRequest::success("Application sent").with_duration(ms(2000)));
}

bus_test!(test_consumers_share_one_bus, {
    let (bus, clock) = create_test_bus(create_unread_seed(2));

    context::scope(&bus, apply_to_job);

    assert_eq!(bus.unread_count(), 3);
    assert_eq!(bus.notifications()[0].title, "Application sent");
    assert_eq!(bus.toasts().len(), 1);

    clock.advance(ms(2000));
    assert!(bus.toasts().is_empty());
    assert_eq!(bus.notifications().len(), 3);
    Ok(())
});

bus_test!(test_access_outside_scope_is_reported, {
    let result = context::with_bus(|bus| bus.unread_count());
    assert!(matches!(result, Err(DomainError::ScopeMisuse(_))));
    Ok(())
});

#[test]
#[should_panic(expected = "Scope misuse")]
fn test_use_bus_outside_scope_panics() {
    init();
    context::use_bus();
}

bus_test!(test_scope_does_not_leak_to_other_threads, {
    let (bus, _clock) = create_test_bus(Vec::new());
    context::scope(&bus, || {
        let elsewhere = std::thread::spawn(|| context::try_current().is_err())
            .join()
            .unwrap();
        assert!(elsewhere);
        assert!(context::try_current().is_ok());
    });
    Ok(())
});

bus_test!(test_toast_action_keeps_timer_running, {
    let (bus, clock) = create_test_bus(Vec::new());
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();

    let id = bus.show_toast(
        ToastRequest::info("Interview moved")
            .with_message("Now Thursday 14:00")
            .with_duration(ms(3000))
            .with_action(ToastAction::new("Open calendar", move || {
                sink.lock().push("calendar")
            })),
    );

    clock.advance(ms(1000));
    assert!(bus.trigger_toast_action(id));
    assert_eq!(bus.toasts().len(), 1);

    clock.advance(ms(2000));
    assert!(bus.toasts().is_empty());
    assert!(!bus.trigger_toast_action(id));
    assert_eq!(*log.lock(), vec!["calendar"]);
    Ok(())
});

bus_test!(test_configured_bus_from_json_seed, {
    let seed = serde_json::json!([
        {
            "id": "6a2f41a0-0c3e-4d8e-9a57-1f0c7d6b9e11",
            "category": "Interview",
            "title": "Interview scheduled",
            "message": "Friday 10:00",
            "created_at": "2024-05-01T09:00:00Z",
            "is_read": false,
            "action_label": null,
            "action_target": null,
            "icon": "calendar"
        },
        {
            "id": "0b7e9d52-8f61-4a3b-b0c4-2d9a5e3f7c80",
            "category": { "Custom": "digest" },
            "title": "Weekly digest",
            "message": "12 new roles",
            "created_at": "2024-04-29T09:00:00Z",
            "is_read": true,
            "action_label": null,
            "action_target": null,
            "icon": null,
            "metadata": { "roles": 12 }
        }
    ]);

    let clock = Arc::new(VirtualScheduler::new());
    let bus = NotificationBus::builder()
        .config(BusConfig::with_default_toast_duration(ms(800)))
        .scheduler(clock.clone())
        .seed_json(&seed.to_string())?
        .build()?;

    assert_eq!(bus.notifications().len(), 2);
    assert_eq!(bus.unread_count(), 1);
    assert_eq!(bus.notifications()[1].metadata["roles"], serde_json::json!(12));

    bus.show_toast(ToastRequest::info("Synced"));
    clock.advance(ms(800));
    assert!(bus.toasts().is_empty());
    Ok(())
});
