use notification_bus_lib::{
    context, BusConfig, NewNotification, Notification, NotificationBus, ToastAction,
    ToastRequest,
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn seed() -> Vec<Notification> {
    vec![
        Notification::new(
            NewNotification::new("match", "New job match", "3 roles match your profile")
                .with_action("View matches", "/jobs/matches"),
        ),
        Notification::new(
            NewNotification::new("interview", "Interview scheduled", "Friday at 10:00")
                .with_icon("calendar"),
        ),
    ]
}

fn announce_profile_saved() {
    let bus = context::use_bus();
    bus.show_toast(
        ToastRequest::success("Profile saved")
            .with_message("Employers can now see your changes")
            .with_duration(Duration::from_millis(1500))
            .with_action(ToastAction::new("Undo", || info!("Undo requested"))),
    );
    bus.add_notification(NewNotification::new(
        "success",
        "Profile updated",
        "Your profile changes are live",
    ));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false)
        .init();

    let bus = NotificationBus::builder()
        .config(BusConfig::default())
        .seed(seed())
        .build()?;

    let mut toasts = bus.watch_toasts();
    context::scope(&bus, announce_profile_saved);
    bus.show_toast(ToastRequest::info("Tip").with_message("Complete your skills section"));

    info!(
        notifications = bus.notifications().len(),
        unread = bus.unread_count(),
        toasts = bus.toasts().len(),
        "Bus populated"
    );

    bus.mark_all_as_read();

    while !toasts.borrow_and_update().is_empty() {
        toasts.changed().await?;
        info!(remaining = toasts.borrow().len(), "Toast stack changed");
    }

    info!(unread = bus.unread_count(), "All toasts expired");
    Ok(())
}
