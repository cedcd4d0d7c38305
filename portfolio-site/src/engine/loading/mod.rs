//! One-shot loading of the project list.

/// Fetches `projects.json` through the asset server and settles the catalog.
pub mod project_loader;
