//! End-to-end navigation through a headless app with in-memory hosts.

use std::time::Duration;

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use constants::dom::{self, class};
use portfolio_site::SitePlugin;
use portfolio_site::config::SiteConfig;
use portfolio_site::dom::lazy_media::{LazyMediaLoader, RecordingMediaObserver};
use portfolio_site::dom::surface::{DomHost, RecordingDom};
use portfolio_site::engine::assets::project_manifest::ProjectManifest;
use portfolio_site::engine::loading::project_loader::ProjectManifestLoader;
use portfolio_site::engine::scene::AboutSceneCommand;
use portfolio_site::routing::history::{
    HistoryBackend, HistoryHost, MemoryHistory, NavigationRequest,
};
use portfolio_site::views::controller::ViewController;
use portfolio_site::views::view::ViewKind;

const PROJECTS: &str = r#"{
    "project_list": [
        {
            "id": "a",
            "title": "Alpha",
            "client": "North",
            "year": 2023,
            "role": "Lead",
            "category": "work",
            "tags": ["webgl"],
            "thumbnail": {"type": "image", "path": "thumb.jpg"},
            "mediaGallery": [{"type": "image", "path": "one.jpg", "caption": "One"}],
            "body": "First line\nSecond line"
        },
        {
            "id": "b",
            "title": "Beta",
            "category": "project",
            "thumbnail": {"type": "video", "path": "loop.mp4"}
        }
    ]
}"#;

const STEP: Duration = Duration::from_millis(50);

/// Every about-scene command seen, kept past the event buffer's lifetime.
#[derive(Resource, Default)]
struct SceneLog(Vec<AboutSceneCommand>);

fn record_scene_commands(
    mut commands: EventReader<AboutSceneCommand>,
    mut log: ResMut<SceneLog>,
) {
    log.0.extend(commands.read().cloned());
}

struct Harness {
    app: App,
    dom: RecordingDom,
    history: MemoryHistory,
    observer: RecordingMediaObserver,
}

impl Harness {
    fn start_at(path: &str) -> Self {
        let dom = RecordingDom::site_shell();
        let history = MemoryHistory::starting_at(path);
        let observer = RecordingMediaObserver::default();

        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin {
                meta_check: AssetMetaCheck::Never,
                ..default()
            },
            StatesPlugin,
        ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
        .insert_non_send_resource(DomHost::new(dom.clone()))
        .insert_non_send_resource(HistoryHost::new(history.clone()))
        .insert_non_send_resource(LazyMediaLoader::new(observer.clone()))
        .add_plugins(SitePlugin)
        .init_resource::<SceneLog>()
        .add_systems(Update, record_scene_commands);

        let manifest: ProjectManifest = serde_json::from_str(PROJECTS).unwrap();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<ProjectManifest>>()
            .add(manifest);
        app.world_mut().resource_mut::<ProjectManifestLoader>().handle = Some(handle);

        let mut harness = Self {
            app,
            dom,
            history,
            observer,
        };
        harness.settle();
        harness
    }

    /// Run long enough for any transition to finish.
    fn settle(&mut self) {
        self.update(20);
    }

    fn update(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    fn transitioning(&self) -> bool {
        self.app.world().resource::<ViewController>().is_transitioning()
    }

    fn navigate(&mut self, path: &str) {
        self.app
            .world_mut()
            .send_event(NavigationRequest::to(path));
        self.settle();
    }

    fn back(&mut self) {
        assert!(self.history.back());
        self.settle();
    }

    fn visible(&self) -> Vec<ViewKind> {
        ViewKind::ALL
            .into_iter()
            .filter(|kind| !self.dom.has_class(kind.container(), class::HIDDEN))
            .collect()
    }

    fn grid_html(&self) -> String {
        self.dom.inner_html(dom::GRID_CONTAINER).unwrap_or_default()
    }

    fn active(&self) -> Option<ViewKind> {
        self.app.world().resource::<ViewController>().active()
    }
}

fn shows_only(html: &str, id: &str, absent: &str) -> bool {
    let card = |id: &str| format!(r#"data-id="{id}""#);
    html.contains(&card(id)) && !html.contains(&card(absent))
}

#[test]
fn browsing_grids_detail_and_back() {
    let mut site = Harness::start_at("/");
    assert_eq!(site.visible(), [ViewKind::Grid]);
    assert!(shows_only(&site.grid_html(), "a", "b"));

    site.navigate("/projects");
    assert_eq!(site.visible(), [ViewKind::Grid]);
    assert!(shows_only(&site.grid_html(), "b", "a"));

    site.navigate("/work/a");
    assert_eq!(site.visible(), [ViewKind::Detail]);
    let detail = site.dom.inner_html(dom::DETAIL_VIEW).unwrap();
    assert!(detail.contains("Alpha"));
    assert!(detail.contains(r#"data-src="/media/projects/a/one.jpg""#));
    assert_eq!(site.observer.containers(), [dom::DETAIL_VIEW]);

    site.back();
    assert_eq!(site.history.current_path(), "/projects");
    assert_eq!(site.visible(), [ViewKind::Grid]);
    assert!(shows_only(&site.grid_html(), "b", "a"));

    site.back();
    assert_eq!(site.visible(), [ViewKind::Grid]);
    assert!(shows_only(&site.grid_html(), "a", "b"));
}

#[test]
fn deep_link_to_detail_renders_on_first_load() {
    let site = Harness::start_at("/project/b");
    assert_eq!(site.active(), Some(ViewKind::Detail));
    assert_eq!(site.visible(), [ViewKind::Detail]);
    assert!(site.dom.inner_html(dom::DETAIL_VIEW).unwrap().contains("Beta"));
}

#[test]
fn unknown_project_redirects_home() {
    let mut site = Harness::start_at("/");
    site.navigate("/work/missing");

    assert_eq!(site.history.current_path(), "/");
    assert_eq!(site.visible(), [ViewKind::Grid]);
    assert!(shows_only(&site.grid_html(), "a", "b"));
}

#[test]
fn renavigating_to_the_shown_route_leaves_the_page_alone() {
    let mut site = Harness::start_at("/about");
    assert_eq!(site.visible(), [ViewKind::About]);
    let mutations = site.dom.mutation_count();

    site.navigate("/about");

    assert_eq!(site.dom.mutation_count(), mutations);
    assert_eq!(site.active(), Some(ViewKind::About));
}

#[test]
fn rapid_navigation_lands_on_the_last_route() {
    let mut site = Harness::start_at("/");
    {
        let world = site.app.world_mut();
        world.send_event(NavigationRequest::to("/work/a"));
        world.send_event(NavigationRequest::to("/about"));
    }
    site.settle();

    assert_eq!(site.visible(), [ViewKind::About]);
    assert_eq!(site.dom.inner_html(dom::DETAIL_VIEW).as_deref(), Some(""));
    assert!(site.observer.containers().is_empty());
}

#[test]
fn about_scene_follows_the_about_view() {
    let mut site = Harness::start_at("/about");
    site.navigate("/");

    let log = &site.app.world().resource::<SceneLog>().0;
    assert_eq!(
        log,
        &[
            AboutSceneCommand::Mount {
                container: dom::ABOUT_VIEW.to_string()
            },
            AboutSceneCommand::Dispose,
        ]
    );
    assert_eq!(site.visible(), [ViewKind::Grid]);
}

#[test]
fn exit_phase_lasts_the_full_transition() {
    let mut site = Harness::start_at("/");
    let exit_frames =
        (SiteConfig::default().transition_duration().as_millis() / STEP.as_millis()) as usize;

    site.app
        .world_mut()
        .send_event(NavigationRequest::to("/work/a"));
    site.update(1);
    assert!(site.transitioning());
    assert!(site.dom.has_class(dom::GRID_VIEW, class::EXITING));

    // The frame that started the exit does not count towards it.
    site.update(exit_frames - 1);
    assert!(site.transitioning());
    assert_eq!(site.visible(), [ViewKind::Grid]);

    site.update(1);
    assert!(!site.transitioning());
    assert_eq!(site.visible(), [ViewKind::Detail]);
}
