//! Page-facing capabilities behind traits.
//!
//! Browser APIs are not `Send`, so each capability lives in a non-send
//! resource ("host") holding a boxed trait object. The web build installs
//! browser-backed implementations; native builds and tests use the in-memory
//! recorders defined alongside each trait.

/// `DomSurface` trait, `DomHost` resource and the in-memory `RecordingDom`.
pub mod surface;

/// Deferred media registration and the page-wide lazy loader.
pub mod lazy_media;

/// Auto-expiring, dismissible user notifications.
pub mod notification;
