use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::config::SiteConfig;
use crate::dom::lazy_media::{
    LazyMediaLoader, RecordingMediaObserver, RegisterLazyMedia, destroy_lazy_loader_on_exit,
    register_lazy_media,
};
use crate::dom::notification::{
    DismissNotification, Notification, NotificationTray, present_notifications,
};
use crate::dom::surface::{DomHost, RecordingDom};
use crate::engine::assets::project_manifest::ProjectManifest;
use crate::engine::core::app_state::{SiteState, announce_ready};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::project_loader::{
    ProjectCatalog, ProjectManifestLoader, poll_project_manifest, start_loading,
};
use crate::engine::scene::{AboutPointerEvent, AboutSceneCommand, DecorativeScenePlugin};
use crate::routing::history::{
    HistoryHost, LocationChanged, MemoryHistory, NavigationRequest, apply_navigation_requests,
    poll_history,
};
use crate::views::controller::{
    ViewController, advance_view_transition, resolve_location, track_location_changes,
};

#[cfg(target_arch = "wasm32")]
use crate::web::WebHostPlugin;

const LOG_FILTER: &str = "wgpu=error,naga=warn,portfolio_site=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins());

    // Browser hosts and the page config must exist before the site plugin
    // falls back to in-memory ones.
    #[cfg(target_arch = "wasm32")]
    app.add_plugins(WebHostPlugin);

    app.add_plugins(SitePlugin)
        .add_plugins(DecorativeScenePlugin)
        .insert_resource(ClearColor(Color::NONE));

    app
}

/// Frame phases. Browser input is drained first so a click is routed,
/// resolved and rendered within the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteSet {
    Input,
    Routing,
    Views,
    Presentation,
}

/// Routing, catalog loading, view transitions and notifications.
///
/// Needs `StatesPlugin` and `AssetPlugin` (both part of `DefaultPlugins`).
/// Hosts already inserted are kept; missing ones fall back to the in-memory
/// recorders so the plugin also runs natively and headless.
pub struct SitePlugin;

impl Plugin for SitePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_non_send::<DomHost>() {
            app.insert_non_send_resource(DomHost::new(RecordingDom::site_shell()));
        }
        if !app.world().contains_non_send::<HistoryHost>() {
            app.insert_non_send_resource(HistoryHost::new(MemoryHistory::default()));
        }
        if !app.world().contains_non_send::<LazyMediaLoader>() {
            app.insert_non_send_resource(LazyMediaLoader::new(
                RecordingMediaObserver::default(),
            ));
        }

        let config = app
            .world()
            .get_resource::<SiteConfig>()
            .cloned()
            .unwrap_or_default();

        app.add_plugins(JsonAssetPlugin::<ProjectManifest>::new(&["json"]))
            .init_state::<SiteState>()
            .add_event::<LocationChanged>()
            .add_event::<NavigationRequest>()
            .add_event::<Notification>()
            .add_event::<DismissNotification>()
            .add_event::<RegisterLazyMedia>()
            .add_event::<AboutSceneCommand>()
            .add_event::<AboutPointerEvent>()
            .init_resource::<ProjectCatalog>()
            .init_resource::<ProjectManifestLoader>()
            .init_resource::<NotificationTray>()
            .insert_resource(ViewController::new(&config))
            .insert_resource(config);

        app.configure_sets(
            Update,
            (
                SiteSet::Input,
                SiteSet::Routing,
                SiteSet::Views,
                SiteSet::Presentation,
            )
                .chain(),
        );

        app.add_systems(Startup, start_loading)
            .add_systems(OnEnter(SiteState::Ready), announce_ready)
            .add_systems(
                Update,
                (
                    (apply_navigation_requests, poll_history).chain(),
                    poll_project_manifest.run_if(in_state(SiteState::Loading)),
                )
                    .in_set(SiteSet::Routing),
            )
            .add_systems(
                Update,
                (
                    track_location_changes,
                    // An exit phase started this frame is first ticked next frame.
                    (advance_view_transition, resolve_location)
                        .chain()
                        .run_if(in_state(SiteState::Ready)),
                )
                    .chain()
                    .in_set(SiteSet::Views),
            )
            .add_systems(
                Update,
                (
                    register_lazy_media,
                    present_notifications,
                    destroy_lazy_loader_on_exit,
                )
                    .in_set(SiteSet::Presentation),
            );
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    // Absolute on the web so deep links like /work/slug fetch /data/...
    #[cfg(target_arch = "wasm32")]
    let file_path = "/";
    #[cfg(not(target_arch = "wasm32"))]
    let file_path = "web";

    let asset_config = AssetPlugin {
        file_path: file_path.into(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.into(),
        level: Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
