//! Data model of the portfolio.

/// Project, media reference and gallery item types.
pub mod project;

/// `projects.json` asset accepting both historical document shapes.
pub mod project_manifest;
