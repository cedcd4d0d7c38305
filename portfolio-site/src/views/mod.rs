//! Page views and the controller that switches between them.
//!
//! Renderers are pure functions from data to markup; only
//! [`view::render_view`] and the controller touch the DOM surface.

/// HTML escaping and paragraph helpers shared by the renderers.
pub mod markup;

/// Resolution of project-relative media paths under the media root.
pub mod media_resolver;

/// Project card grid for the work and projects listings.
pub mod grid;

/// Single project page with meta, body and deferred gallery.
pub mod detail;

/// Static biography markup.
pub mod about;

/// `View` values, their containers and the render entry point.
pub mod view;

/// Route resolution and the exit/enter transition state machine.
///
/// Owns the active view, supersedes stale transitions and emits effects for
/// lazy media and the about scene.
pub mod controller;
