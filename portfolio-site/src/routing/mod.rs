//! Client-side routing.
//!
//! The router owns no view state. It parses the live location, pushes history
//! entries and broadcasts [`history::LocationChanged`]; the view controller
//! decides what to show.

/// URL path parsing into structured routes.
pub mod location;

/// History backends, the `Router` system parameter and navigation events.
pub mod history;
