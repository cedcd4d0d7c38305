//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, the loading-to-ready
//! transition and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration.
///
/// Creates the app with the site plugin, decorative scenes and, on the web,
/// the browser host.
pub mod app_setup;

/// Site lifecycle state: loading the catalog, then ready.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds the render surface to the page's background canvas on the web.
pub mod window_config;
