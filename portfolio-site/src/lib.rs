//! Single-page portfolio rendered into a static HTML shell.
//!
//! Client-side routing switches between a project grid, a project detail page
//! and an about page, with animated transitions, lazily loaded gallery media
//! and a decorative WebGL background drawn by Bevy.

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod routing;
pub mod views;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::core::app_setup::{SitePlugin, create_app};
