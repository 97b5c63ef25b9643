use std::time::Duration;

use crate::domain::entities::DEFAULT_TOAST_DURATION;

pub struct BusConfig {
    pub default_toast_duration: Duration,
    pub event_channel_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            default_toast_duration: DEFAULT_TOAST_DURATION, // 5 seconds
            event_channel_capacity: 256,
        }
    }
}

impl BusConfig {
    pub fn new(default_toast_duration: Duration, event_channel_capacity: usize) -> Self {
        Self {
            default_toast_duration,
            event_channel_capacity,
        }
    }

    pub fn with_default_toast_duration(duration: Duration) -> Self {
        let mut config = Self::default();
        config.default_toast_duration = duration;
        config
    }

    pub fn with_event_channel_capacity(capacity: usize) -> Self {
        let mut config = Self::default();
        config.event_channel_capacity = capacity;
        config
    }
}
