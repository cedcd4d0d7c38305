/// Exit animation budget before the outgoing view is hidden.
pub const TRANSITION_DURATION_MS: u64 = 300;

/// How long a notification stays visible before fading.
pub const NOTIFICATION_LIFETIME_MS: u64 = 5000;

/// Fade-out duration before a notification element is removed.
pub const NOTIFICATION_FADE_MS: u64 = 400;
