//! The view state machine.
//!
//! `ViewController` owns which view is visible and drives the exit-then-enter
//! transition between views. A transition is an explicit value: when a newer
//! navigation arrives mid-transition it replaces the pending target, so only
//! one delayed completion can ever fire.
//!
//! ```text
//! LocationChanged ──> resolve_location ──> decide()
//!                                            ├─ Unchanged   (no DOM writes)
//!                                            ├─ Redirect    ──> NavigationRequest("/")
//!                                            └─ Show(view)  ──> begin()
//!                                                               ├─ no active view: complete()
//!                                                               └─ mark exiting, wait ──> complete()
//! ```

use std::time::Duration;

use bevy::prelude::*;
use constants::dom::class;
use constants::routes;

use super::view::{View, ViewKind, render_view};
use crate::config::SiteConfig;
use crate::dom::lazy_media::RegisterLazyMedia;
use crate::dom::surface::{DomHost, DomSurface};
use crate::engine::assets::project::Project;
use crate::engine::loading::project_loader::ProjectCatalog;
use crate::engine::scene::AboutSceneCommand;
use crate::routing::history::{HistoryHost, LocationChanged, NavigationRequest};
use crate::routing::location::{Category, Route};

/// Outcome of resolving a route against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    Show(View),
    Redirect(String),
    /// Route already shown or being transitioned to.
    Unchanged,
}

/// Pick the view for `route`.
///
/// `heading_to` is the route currently displayed or, mid-transition, the one
/// being transitioned to. Only top-level routes are deduplicated; a detail
/// route always re-resolves.
pub fn decide(route: &Route, catalog: &[Project], heading_to: Option<&Route>) -> RouteDecision {
    if let Some(target) = &route.detail {
        return match catalog.iter().find(|p| p.id == target.project_id) {
            Some(project) => RouteDecision::Show(View::Detail(project.clone())),
            None => {
                warn!("Unknown project '{}', redirecting home", target.project_id);
                RouteDecision::Redirect(routes::HOME.to_string())
            }
        };
    }

    if heading_to == Some(route) {
        return RouteDecision::Unchanged;
    }

    if route.is_about() {
        RouteDecision::Show(View::About)
    } else {
        RouteDecision::Show(View::grid(Category::for_listing(&route.path), catalog))
    }
}

/// Side effects requested by a completed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    MountAboutScene { container: &'static str },
    DisposeAboutScene,
    RegisterLazyMedia { container: &'static str },
}

#[derive(Debug)]
struct ExitPhase {
    from: ViewKind,
    timer: Timer,
}

#[derive(Debug)]
struct PendingTransition {
    view: View,
    route: Route,
    exit: Option<ExitPhase>,
}

#[derive(Resource, Debug)]
pub struct ViewController {
    active: Option<ViewKind>,
    displayed: Option<Route>,
    pending: Option<PendingTransition>,
    resolution_requested: bool,
    transition_duration: Duration,
    media_root: String,
}

impl ViewController {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            active: None,
            displayed: None,
            pending: None,
            // The first location is resolved as soon as the catalog is ready.
            resolution_requested: true,
            transition_duration: config.transition_duration(),
            media_root: config.media_root.clone(),
        }
    }

    pub fn active(&self) -> Option<ViewKind> {
        self.active
    }

    pub fn displayed(&self) -> Option<&Route> {
        self.displayed.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn request_resolution(&mut self) {
        self.resolution_requested = true;
    }

    fn take_resolution_request(&mut self) -> bool {
        std::mem::take(&mut self.resolution_requested)
    }

    fn heading_to(&self) -> Option<&Route> {
        self.pending
            .as_ref()
            .map(|pending| &pending.route)
            .or(self.displayed.as_ref())
    }

    /// Resolve `route` and start the matching transition. Returns a redirect
    /// when the route names an unknown project.
    pub fn handle_route(
        &mut self,
        route: Route,
        catalog: &[Project],
        surface: &mut dyn DomSurface,
        effects: &mut Vec<ViewEffect>,
    ) -> Option<NavigationRequest> {
        match decide(&route, catalog, self.heading_to()) {
            RouteDecision::Show(view) => {
                self.begin(view, route, surface, effects);
                None
            }
            RouteDecision::Redirect(path) => Some(NavigationRequest::to(path)),
            RouteDecision::Unchanged => {
                debug!("Already showing {}", route.path);
                None
            }
        }
    }

    fn begin(
        &mut self,
        view: View,
        route: Route,
        surface: &mut dyn DomSurface,
        effects: &mut Vec<ViewEffect>,
    ) {
        let exit = match self.pending.take() {
            Some(superseded) => {
                // The exiting view is still the visible one; keep its timer.
                debug!(
                    "Transition to {} superseded by {}",
                    superseded.route.path, route.path
                );
                superseded.exit
            }
            None => self.active.map(|from| {
                set_class(surface, from.container(), class::EXITING, true);
                ExitPhase {
                    from,
                    timer: Timer::new(self.transition_duration, TimerMode::Once),
                }
            }),
        };

        let immediate = exit.is_none();
        self.pending = Some(PendingTransition { view, route, exit });
        if immediate {
            self.complete(surface, effects);
        }
    }

    /// Tick the exit phase of a pending transition.
    pub fn advance(
        &mut self,
        delta: Duration,
        surface: &mut dyn DomSurface,
        effects: &mut Vec<ViewEffect>,
    ) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if let Some(exit) = pending.exit.as_mut() {
            if !exit.timer.tick(delta).finished() {
                return;
            }
            debug!("{:?} exit finished", exit.from);
        }
        self.complete(surface, effects);
    }

    fn complete(&mut self, surface: &mut dyn DomSurface, effects: &mut Vec<ViewEffect>) {
        let Some(PendingTransition { view, route, .. }) = self.pending.take() else {
            return;
        };
        let target = view.kind();
        let previous = self.active.take();

        match previous {
            Some(from) => {
                set_class(surface, from.container(), class::HIDDEN, true);
                set_class(surface, from.container(), class::EXITING, false);
                if from == ViewKind::About && target != ViewKind::About {
                    effects.push(ViewEffect::DisposeAboutScene);
                }
            }
            None => {
                for other in ViewKind::ALL.into_iter().filter(|kind| *kind != target) {
                    set_class(surface, other.container(), class::HIDDEN, true);
                }
            }
        }

        match render_view(&view, surface, &self.media_root) {
            Ok(()) if target == ViewKind::Detail => effects.push(ViewEffect::RegisterLazyMedia {
                container: target.content_target(),
            }),
            Ok(()) => {}
            Err(e) => error!("Rendering {:?} view failed: {}", target, e),
        }

        if target == ViewKind::About && previous != Some(ViewKind::About) {
            effects.push(ViewEffect::MountAboutScene {
                container: target.container(),
            });
        }

        let container = target.container();
        set_class(surface, container, class::ENTERING, true);
        set_class(surface, container, class::HIDDEN, false);
        if let Err(e) = surface.force_reflow(container) {
            warn!("Reflow of {} failed: {}", container, e);
        }
        set_class(surface, container, class::ENTERING, false);

        info!("Showing {:?} for {}", target, route.path);
        self.active = Some(target);
        self.displayed = Some(route);
    }
}

fn set_class(surface: &mut dyn DomSurface, selector: &str, class: &str, enabled: bool) {
    if let Err(e) = surface.set_class(selector, class, enabled) {
        warn!("Could not toggle '{}' on {}: {}", class, selector, e);
    }
}

fn dispatch_effects(
    effects: Vec<ViewEffect>,
    lazy_media: &mut EventWriter<RegisterLazyMedia>,
    scene: &mut EventWriter<AboutSceneCommand>,
) {
    for effect in effects {
        match effect {
            ViewEffect::MountAboutScene { container } => {
                scene.write(AboutSceneCommand::Mount {
                    container: container.to_string(),
                });
            }
            ViewEffect::DisposeAboutScene => {
                scene.write(AboutSceneCommand::Dispose);
            }
            ViewEffect::RegisterLazyMedia { container } => {
                lazy_media.write(RegisterLazyMedia {
                    container: container.to_string(),
                });
            }
        }
    }
}

/// Any number of change notifications in a frame collapse into one resolution.
pub fn track_location_changes(
    mut changes: EventReader<LocationChanged>,
    mut controller: ResMut<ViewController>,
) {
    if changes.read().count() > 0 {
        controller.request_resolution();
    }
}

pub fn resolve_location(
    mut controller: ResMut<ViewController>,
    history: NonSend<HistoryHost>,
    catalog: Res<ProjectCatalog>,
    mut dom: NonSendMut<DomHost>,
    mut navigation: EventWriter<NavigationRequest>,
    mut lazy_media: EventWriter<RegisterLazyMedia>,
    mut scene: EventWriter<AboutSceneCommand>,
) {
    if !controller.take_resolution_request() {
        return;
    }

    let route = history.current_location();
    let mut effects = Vec::new();
    if let Some(redirect) =
        controller.handle_route(route, catalog.projects(), dom.surface_mut(), &mut effects)
    {
        navigation.write(redirect);
    }
    dispatch_effects(effects, &mut lazy_media, &mut scene);
}

pub fn advance_view_transition(
    time: Res<Time>,
    mut controller: ResMut<ViewController>,
    mut dom: NonSendMut<DomHost>,
    mut lazy_media: EventWriter<RegisterLazyMedia>,
    mut scene: EventWriter<AboutSceneCommand>,
) {
    if !controller.is_transitioning() {
        return;
    }
    let mut effects = Vec::new();
    controller.advance(time.delta(), dom.surface_mut(), &mut effects);
    dispatch_effects(effects, &mut lazy_media, &mut scene);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::surface::RecordingDom;
    use crate::engine::assets::project::fixtures::project;
    use crate::routing::location::parse_location;
    use constants::dom;

    const STEP: Duration = Duration::from_millis(100);

    fn catalog() -> Vec<Project> {
        vec![project("a", Category::Work), project("b", Category::Project)]
    }

    fn controller() -> ViewController {
        ViewController::new(&SiteConfig::default())
    }

    fn visible_views(surface: &RecordingDom) -> Vec<ViewKind> {
        ViewKind::ALL
            .into_iter()
            .filter(|kind| !surface.has_class(kind.container(), class::HIDDEN))
            .collect()
    }

    fn navigate(
        controller: &mut ViewController,
        surface: &mut RecordingDom,
        path: &str,
    ) -> (Option<NavigationRequest>, Vec<ViewEffect>) {
        let mut effects = Vec::new();
        let redirect =
            controller.handle_route(parse_location(path), &catalog(), surface, &mut effects);
        (redirect, effects)
    }

    fn settle(controller: &mut ViewController, surface: &mut RecordingDom) -> Vec<ViewEffect> {
        let mut effects = Vec::new();
        for _ in 0..10 {
            controller.advance(STEP, surface, &mut effects);
        }
        effects
    }

    #[test]
    fn first_load_renders_immediately_and_hides_the_rest() {
        let mut surface = RecordingDom::site_shell();
        let mut controller = controller();

        navigate(&mut controller, &mut surface, "/");

        assert!(!controller.is_transitioning());
        assert_eq!(controller.active(), Some(ViewKind::Grid));
        assert_eq!(visible_views(&surface), [ViewKind::Grid]);
        let grid = surface.inner_html(dom::GRID_CONTAINER).unwrap();
        assert!(grid.contains(r#"data-id="a""#));
        assert!(!grid.contains(r#"data-id="b""#));
    }

    #[test]
    fn exit_phase_completes_before_new_content_is_written() {
        let mut surface = RecordingDom::site_shell();
        let mut controller = controller();
        navigate(&mut controller, &mut surface, "/");

        navigate(&mut controller, &mut surface, "/work/a");
        assert!(surface.has_class(dom::GRID_VIEW, class::EXITING));
        assert_eq!(surface.inner_html(dom::DETAIL_VIEW).as_deref(), Some(""));
        assert_eq!(visible_views(&surface), [ViewKind::Grid]);

        let mut effects = Vec::new();
        controller.advance(STEP, &mut surface, &mut effects);
        assert!(controller.is_transitioning());
        assert_eq!(surface.inner_html(dom::DETAIL_VIEW).as_deref(), Some(""));

        effects.extend(settle(&mut controller, &mut surface));
        assert_eq!(visible_views(&surface), [ViewKind::Detail]);
        assert!(!surface.has_class(dom::GRID_VIEW, class::EXITING));
        assert!(!surface.has_class(dom::DETAIL_VIEW, class::ENTERING));
        assert_eq!(surface.element(dom::DETAIL_VIEW).unwrap().reflows, 1);
        assert!(
            surface
                .inner_html(dom::DETAIL_VIEW)
                .unwrap()
                .contains("Project a")
        );
        assert_eq!(
            effects,
            [ViewEffect::RegisterLazyMedia {
                container: dom::DETAIL_VIEW
            }]
        );
    }

    #[test]
    fn repeated_top_level_route_is_a_no_op() {
        let mut surface = RecordingDom::site_shell();
        let mut controller = controller();
        navigate(&mut controller, &mut surface, "/projects");
        let mutations = surface.mutation_count();

        let (redirect, effects) = navigate(&mut controller, &mut surface, "/projects");

        assert_eq!(redirect, None);
        assert!(effects.is_empty());
        assert!(!controller.is_transitioning());
        assert_eq!(surface.mutation_count(), mutations);
    }

    #[test]
    fn unknown_project_redirects_home_without_touching_views() {
        let mut surface = RecordingDom::site_shell();
        let mut controller = controller();
        navigate(&mut controller, &mut surface, "/");
        let mutations = surface.mutation_count();

        let (redirect, _) = navigate(&mut controller, &mut surface, "/work/missing");

        assert_eq!(redirect, Some(NavigationRequest::to("/")));
        assert_eq!(surface.mutation_count(), mutations);
        assert_eq!(controller.active(), Some(ViewKind::Grid));
    }

    #[test]
    fn newer_navigation_supersedes_pending_transition() {
        let mut surface = RecordingDom::site_shell();
        let mut controller = controller();
        navigate(&mut controller, &mut surface, "/");

        navigate(&mut controller, &mut surface, "/work/a");
        let mut effects = Vec::new();
        controller.advance(STEP, &mut surface, &mut effects);
        let (_, mut more) = navigate(&mut controller, &mut surface, "/about");
        effects.append(&mut more);
        effects.extend(settle(&mut controller, &mut surface));

        assert_eq!(controller.active(), Some(ViewKind::About));
        assert_eq!(visible_views(&surface), [ViewKind::About]);
        assert_eq!(surface.inner_html(dom::DETAIL_VIEW).as_deref(), Some(""));
        assert_eq!(
            effects,
            [ViewEffect::MountAboutScene {
                container: dom::ABOUT_VIEW
            }]
        );
    }

    #[test]
    fn leaving_about_disposes_scene() {
        let mut surface = RecordingDom::site_shell();
        let mut controller = controller();
        let (_, effects) = navigate(&mut controller, &mut surface, "/about");
        assert_eq!(
            effects,
            [ViewEffect::MountAboutScene {
                container: dom::ABOUT_VIEW
            }]
        );

        navigate(&mut controller, &mut surface, "/projects");
        let effects = settle(&mut controller, &mut surface);
        assert_eq!(effects, [ViewEffect::DisposeAboutScene]);
        assert_eq!(visible_views(&surface), [ViewKind::Grid]);
    }

    #[test]
    fn grid_to_grid_switches_category() {
        let mut surface = RecordingDom::site_shell();
        let mut controller = controller();
        navigate(&mut controller, &mut surface, "/");
        navigate(&mut controller, &mut surface, "/projects");
        settle(&mut controller, &mut surface);

        let grid = surface.inner_html(dom::GRID_CONTAINER).unwrap();
        assert!(grid.contains(r#"data-id="b""#));
        assert!(!grid.contains(r#"data-id="a""#));
        assert_eq!(visible_views(&surface), [ViewKind::Grid]);
    }

    #[test]
    fn missing_container_aborts_render_but_not_navigation() {
        let mut surface =
            RecordingDom::with_elements(&[dom::GRID_VIEW, dom::DETAIL_VIEW, dom::ABOUT_VIEW]);
        let mut controller = controller();

        navigate(&mut controller, &mut surface, "/");

        assert_eq!(controller.active(), Some(ViewKind::Grid));
        assert_eq!(controller.displayed(), Some(&Route::top_level("/")));
        assert_eq!(visible_views(&surface), [ViewKind::Grid]);
    }

    #[test]
    fn detail_routes_always_resolve() {
        let catalog = catalog();
        let shown = parse_location("/work/a");
        assert!(matches!(
            decide(&shown, &catalog, Some(&shown)),
            RouteDecision::Show(View::Detail(_))
        ));
        assert_eq!(
            decide(&Route::top_level("/"), &catalog, Some(&Route::top_level("/"))),
            RouteDecision::Unchanged
        );
        assert!(matches!(
            decide(&Route::top_level("/work"), &catalog, Some(&shown)),
            RouteDecision::Show(View::Grid {
                category: Category::Work,
                ..
            })
        ));
    }
}
