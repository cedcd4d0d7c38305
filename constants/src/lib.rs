//! Compile-time tuning values shared by the portfolio site.
//!
//! Presentation values live here so the application crate can expose them as
//! overridable configuration instead of scattering literals through systems.

/// Client-side URL surface and route segment names.
pub mod routes;

/// DOM selectors and class names the view layer relies on.
pub mod dom;

/// Durations for view transitions and notifications.
pub mod timing;

/// Static data location, media roots and lazy loading thresholds.
pub mod media;

/// Decorative scene settings for the background and about canvases.
pub mod render_settings;
