//! Runtime configuration with defaults taken from the `constants` crate.

use std::time::Duration;

use bevy::prelude::*;
use constants::{media, timing};
use serde::Deserialize;

use crate::dom::lazy_media::LazyLoadSettings;
use crate::error::{SiteError, SiteResult};

/// Presentation and data-location settings.
///
/// Every field is optional in the JSON form so a page can override a single
/// value, e.g. `{"transitionMs": 450}`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    /// Asset path of the project list.
    pub data_path: String,
    /// Root of per-project media folders.
    pub media_root: String,
    pub transition_ms: u64,
    pub notification_lifetime_ms: u64,
    pub notification_fade_ms: u64,
    pub lazy_root_margin: String,
    pub lazy_threshold: f64,
    pub mobile_breakpoint_px: f32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_path: media::PROJECTS_DATA_PATH.to_string(),
            media_root: media::MEDIA_ROOT.to_string(),
            transition_ms: timing::TRANSITION_DURATION_MS,
            notification_lifetime_ms: timing::NOTIFICATION_LIFETIME_MS,
            notification_fade_ms: timing::NOTIFICATION_FADE_MS,
            lazy_root_margin: media::LAZY_ROOT_MARGIN.to_string(),
            lazy_threshold: media::LAZY_THRESHOLD,
            mobile_breakpoint_px: media::MOBILE_BREAKPOINT_PX,
        }
    }
}

impl SiteConfig {
    /// Parse a partial JSON override on top of the defaults.
    pub fn from_json(json: &str) -> SiteResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SiteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SiteResult<()> {
        if !(0.0..=1.0).contains(&self.lazy_threshold) {
            return Err(SiteError::Config(format!(
                "lazyThreshold must be within 0..=1, got {}",
                self.lazy_threshold
            )));
        }
        if self.data_path.trim().is_empty() {
            return Err(SiteError::Config("dataPath must not be empty".into()));
        }
        Ok(())
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.notification_lifetime_ms)
    }

    pub fn notification_fade(&self) -> Duration {
        Duration::from_millis(self.notification_fade_ms)
    }

    pub fn lazy_load_settings(&self) -> LazyLoadSettings {
        LazyLoadSettings {
            root_margin: self.lazy_root_margin.clone(),
            threshold: self.lazy_threshold,
        }
    }
}
