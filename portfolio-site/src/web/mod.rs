//! Browser bindings, compiled for `wasm32` only.
//!
//! Each submodule implements one of the capability traits against
//! `web-sys`. Browser callbacks only push into queues; systems drain them at
//! the start of the frame.

use bevy::prelude::*;
use wasm_bindgen::JsValue;

use crate::config::SiteConfig;
use crate::dom::lazy_media::LazyMediaLoader;
use crate::dom::surface::DomHost;
use crate::engine::core::app_setup::SiteSet;
use crate::engine::scene::about::apply_pointer_events;
use crate::routing::history::HistoryHost;

/// `DomSurface` over the live document.
pub mod dom;

/// `HistoryBackend` over `window.history` and `popstate`.
pub mod history;

/// Document-level click delegation for cards, links and notifications.
pub mod events;

/// `IntersectionObserver`-backed deferred media loading.
pub mod lazy_loader;

/// Pointer listeners on the about container while its scene is mounted.
pub mod about_input;

const CONFIG_ATTR: &str = "data-site-config";

/// Installs the browser hosts. Must be added before `SitePlugin`.
pub struct WebHostPlugin;

impl Plugin for WebHostPlugin {
    fn build(&self, app: &mut App) {
        let config = read_page_config();

        match dom::BrowserDom::new() {
            Ok(surface) => {
                app.insert_non_send_resource(DomHost::new(surface));
            }
            Err(e) => error!("DOM unavailable: {}", e),
        }

        match history::BrowserHistory::new() {
            Ok(backend) => {
                app.insert_non_send_resource(HistoryHost::new(backend));
            }
            Err(e) => error!("History unavailable: {}", e),
        }

        match lazy_loader::BrowserMediaObserver::new(
            config.lazy_load_settings(),
            config.mobile_breakpoint_px,
        ) {
            Ok(observer) => {
                app.insert_non_send_resource(LazyMediaLoader::new(observer));
            }
            Err(e) => error!("Lazy media loading unavailable: {}", e),
        }

        match events::PageInput::install() {
            Ok(input) => {
                app.insert_non_send_resource(input)
                    .add_systems(Update, events::drain_page_input.in_set(SiteSet::Input));
            }
            Err(e) => error!("Click handling unavailable: {}", e),
        }

        app.insert_non_send_resource(about_input::AboutPointerListeners::default())
            .add_systems(
                Update,
                (
                    about_input::sync_about_listeners.after(SiteSet::Views),
                    about_input::drain_about_pointer.before(apply_pointer_events),
                ),
            )
            .insert_resource(config);
    }
}

/// Overrides from `<body data-site-config='{...}'>`; defaults when absent or
/// malformed.
fn read_page_config() -> SiteConfig {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
        .and_then(|body| body.get_attribute(CONFIG_ATTR));

    let Some(raw) = raw else {
        return SiteConfig::default();
    };

    match SiteConfig::from_json(&raw) {
        Ok(config) => {
            info!("Using page configuration overrides");
            config
        }
        Err(e) => {
            warn!("Ignoring {}: {}", CONFIG_ATTR, e);
            SiteConfig::default()
        }
    }
}

/// Readable form of a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
