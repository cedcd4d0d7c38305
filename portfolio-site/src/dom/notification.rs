//! Transient, dismissible toasts.

use std::time::Duration;

use bevy::prelude::*;

use super::surface::DomHost;
use crate::config::SiteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Error,
    Info,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Show `message` to the user.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// The user clicked a notification.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissNotification {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq)]
enum ToastPhase {
    /// Mounted, made visible on the next frame so the CSS transition runs.
    Mounted,
    Shown(Timer),
    Fading(Timer),
}

#[derive(Debug)]
struct ActiveToast {
    id: u64,
    phase: ToastPhase,
}

/// Notifications currently in the page.
#[derive(Resource, Debug, Default)]
pub struct NotificationTray {
    next_id: u64,
    active: Vec<ActiveToast>,
}

impl NotificationTray {
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

fn fade_timer(config: &SiteConfig) -> Timer {
    Timer::new(config.notification_fade(), TimerMode::Once)
}

/// Mount new notifications and age existing ones.
pub fn present_notifications(
    mut requests: EventReader<Notification>,
    mut dismissals: EventReader<DismissNotification>,
    mut tray: ResMut<NotificationTray>,
    mut dom: NonSendMut<DomHost>,
    config: Res<SiteConfig>,
    time: Res<Time>,
) {
    let surface = dom.surface_mut();
    let delta = time.delta();

    for dismissal in dismissals.read() {
        if let Some(toast) = tray.active.iter_mut().find(|t| t.id == dismissal.id) {
            if !matches!(toast.phase, ToastPhase::Fading(_)) {
                if let Err(e) = surface.set_notification_visible(toast.id, false) {
                    warn!("Could not hide notification {}: {}", toast.id, e);
                }
                toast.phase = ToastPhase::Fading(fade_timer(&config));
            }
        }
    }

    tray.active.retain_mut(|toast| match &mut toast.phase {
        ToastPhase::Mounted => {
            if let Err(e) = surface.set_notification_visible(toast.id, true) {
                warn!("Could not show notification {}: {}", toast.id, e);
            }
            toast.phase = ToastPhase::Shown(Timer::new(
                config.notification_lifetime(),
                TimerMode::Once,
            ));
            true
        }
        ToastPhase::Shown(timer) => {
            if timer.tick(delta).finished() {
                if let Err(e) = surface.set_notification_visible(toast.id, false) {
                    warn!("Could not hide notification {}: {}", toast.id, e);
                }
                toast.phase = ToastPhase::Fading(fade_timer(&config));
            }
            true
        }
        ToastPhase::Fading(timer) => {
            if timer.tick(delta).finished() {
                surface.remove_notification(toast.id);
                false
            } else {
                true
            }
        }
    });

    for request in requests.read() {
        let id = tray.next_id;
        tray.next_id += 1;
        match surface.mount_notification(id, &request.message, request.level) {
            Ok(()) => tray.active.push(ActiveToast {
                id,
                phase: ToastPhase::Mounted,
            }),
            Err(e) => error!("Could not show notification '{}': {}", request.message, e),
        }
    }
}

/// DOM id of the element showing notification `id`.
pub fn notification_element_id(id: u64) -> String {
    format!("notification-{id}")
}

/// Inverse of [`notification_element_id`].
pub fn parse_notification_element_id(element_id: &str) -> Option<u64> {
    element_id.strip_prefix("notification-")?.parse().ok()
}

/// Total time a notification spends in the page before removal.
pub fn notification_span(config: &SiteConfig) -> Duration {
    config.notification_lifetime() + config.notification_fade()
}
