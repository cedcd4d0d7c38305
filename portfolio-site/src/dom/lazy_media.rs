//! Deferred loading of gallery media.
//!
//! Renderers emit media with a `data-src` attribute instead of `src`. After a
//! render the view controller asks the [`LazyMediaLoader`] to observe the
//! container; the browser observer swaps the source in once the element comes
//! within the configured margin of the viewport.

use std::cell::Cell;
use std::rc::Rc;

use bevy::prelude::*;
use constants::media::VIDEO_EXTENSIONS;

use crate::error::SiteResult;

/// Intersection settings handed to the browser observer.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyLoadSettings {
    /// CSS margin around the viewport, e.g. `"0px 0px 200px 0px"`.
    pub root_margin: String,
    pub threshold: f64,
}

/// Capability to watch deferred media inside a container.
pub trait MediaObserver {
    /// Start observing every deferred element within `container`. Returns
    /// the number of elements registered.
    fn observe_within(&mut self, container: &str) -> SiteResult<usize>;

    /// Stop observing everything.
    fn disconnect(&mut self);
}

/// The single page-wide lazy loader.
pub struct LazyMediaLoader {
    observer: Box<dyn MediaObserver>,
    connected: bool,
}

impl LazyMediaLoader {
    pub fn new(observer: impl MediaObserver + 'static) -> Self {
        Self {
            observer: Box::new(observer),
            connected: true,
        }
    }

    /// Register deferred media in `container`. Returns 0 once destroyed.
    pub fn register(&mut self, container: &str) -> SiteResult<usize> {
        if !self.is_connected() {
            warn!("Lazy loader already destroyed, ignoring {}", container);
            return Ok(0);
        }
        self.observer.observe_within(container)
    }

    pub fn destroy(&mut self) {
        if self.connected {
            self.observer.disconnect();
            self.connected = false;
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Ask the lazy loader to pick up media rendered into `container`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct RegisterLazyMedia {
    pub container: String,
}

pub fn register_lazy_media(
    mut requests: EventReader<RegisterLazyMedia>,
    mut loader: NonSendMut<LazyMediaLoader>,
) {
    for request in requests.read() {
        match loader.register(&request.container) {
            Ok(count) => debug!("Observing {} deferred media in {}", count, request.container),
            Err(e) => error!("Lazy media registration failed: {}", e),
        }
    }
}

pub fn destroy_lazy_loader_on_exit(
    mut exits: EventReader<AppExit>,
    mut loader: NonSendMut<LazyMediaLoader>,
) {
    if exits.read().next().is_some() {
        loader.destroy();
    }
}

/// Raised by an element's load or error handler once it has nothing left to do.
#[derive(Debug, Clone, Default)]
pub struct SettleFlag(Rc<Cell<bool>>);

impl SettleFlag {
    pub fn settle(&self) {
        self.0.set(true);
    }

    pub fn is_settled(&self) -> bool {
        self.0.get()
    }
}

/// Per-element listener sets held until the element settles.
///
/// Handlers only raise their flag. Entries are released by [`prune`], which
/// runs outside any handler, so no listener is dropped while it executes.
///
/// [`prune`]: SettlingRegistry::prune
#[derive(Debug)]
pub struct SettlingRegistry<T> {
    entries: Vec<(SettleFlag, T)>,
}

impl<T> Default for SettlingRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> SettlingRegistry<T> {
    pub fn insert(&mut self, flag: SettleFlag, entry: T) {
        self.entries.push((flag, entry));
    }

    /// Remove entries that settled or that `stale` rejects.
    pub fn prune(&mut self, mut stale: impl FnMut(&T) -> bool) -> Vec<T> {
        let (done, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(flag, entry)| flag.is_settled() || stale(entry));
        self.entries = live;
        done.into_iter().map(|(_, entry)| entry).collect()
    }

    pub fn drain(&mut self) -> Vec<T> {
        self.entries.drain(..).map(|(_, entry)| entry).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Element types the loader knows how to swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredMedia {
    Image,
    Video,
}

impl DeferredMedia {
    pub fn from_tag_name(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "IMG" => Some(Self::Image),
            "VIDEO" => Some(Self::Video),
            _ => None,
        }
    }
}

/// Image swapped in when a video fails: the same path with a known video
/// extension replaced by `.jpg`. Any other source is tried as-is.
pub fn video_fallback_poster(src: &str) -> String {
    match src.rsplit_once('.') {
        Some((stem, extension))
            if !extension.contains('/')
                && VIDEO_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(extension)) =>
        {
            format!("{stem}.jpg")
        }
        _ => src.to_string(),
    }
}

/// Conditions under which a lazily loaded video may start playing on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoplayPolicy {
    pub prefers_reduced_motion: bool,
    pub viewport_width: f32,
    /// `navigator.connection.effectiveType`, when the browser exposes it.
    pub effective_connection: Option<String>,
}

impl AutoplayPolicy {
    pub fn allows_autoplay(&self, mobile_breakpoint_px: f32) -> bool {
        if self.prefers_reduced_motion {
            return false;
        }
        let is_mobile = self.viewport_width <= mobile_breakpoint_px;
        let is_slow = matches!(
            self.effective_connection.as_deref(),
            Some("slow-2g") | Some("2g")
        );
        !(is_mobile || is_slow)
    }
}

/// Observer used off the web: records the containers it was asked to watch.
#[derive(Debug, Clone, Default)]
pub struct RecordingMediaObserver {
    containers: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
    disconnected: std::rc::Rc<std::cell::Cell<bool>>,
}

impl RecordingMediaObserver {
    pub fn containers(&self) -> Vec<String> {
        self.containers.borrow().clone()
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.get()
    }
}

impl MediaObserver for RecordingMediaObserver {
    fn observe_within(&mut self, container: &str) -> SiteResult<usize> {
        self.containers.borrow_mut().push(container.to_string());
        Ok(0)
    }

    fn disconnect(&mut self) {
        self.disconnected.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_swaps_known_video_extensions() {
        assert_eq!(
            video_fallback_poster("/media/projects/a/clip.MP4"),
            "/media/projects/a/clip.jpg"
        );
        assert_eq!(video_fallback_poster("clip.webm"), "clip.jpg");
    }

    #[test]
    fn poster_falls_back_to_the_source_itself() {
        assert_eq!(video_fallback_poster("loop.gif"), "loop.gif");
        assert_eq!(video_fallback_poster("/media/v1.dir/clip"), "/media/v1.dir/clip");
        assert_eq!(video_fallback_poster(""), "");
    }

    #[test]
    fn autoplay_blocked_on_mobile_slow_or_reduced_motion() {
        let desktop = AutoplayPolicy {
            prefers_reduced_motion: false,
            viewport_width: 1440.0,
            effective_connection: Some("4g".into()),
        };
        assert!(desktop.allows_autoplay(768.0));

        let mobile = AutoplayPolicy {
            viewport_width: 768.0,
            ..desktop.clone()
        };
        assert!(!mobile.allows_autoplay(768.0));

        let slow = AutoplayPolicy {
            effective_connection: Some("2g".into()),
            ..desktop.clone()
        };
        assert!(!slow.allows_autoplay(768.0));

        let calm = AutoplayPolicy {
            prefers_reduced_motion: true,
            ..desktop
        };
        assert!(!calm.allows_autoplay(768.0));
    }

    #[test]
    fn destroyed_loader_ignores_registrations() {
        let observer = RecordingMediaObserver::default();
        let mut loader = LazyMediaLoader::new(observer.clone());
        loader.register("#detail-view").unwrap();
        loader.destroy();
        loader.destroy();
        loader.register("#detail-view").unwrap();

        assert_eq!(observer.containers(), vec!["#detail-view".to_string()]);
        assert!(observer.is_disconnected());
        assert!(!loader.is_connected());
    }

    #[test]
    fn settled_and_detached_entries_are_released() {
        let mut registry = SettlingRegistry::default();
        let loaded = SettleFlag::default();
        let pending = SettleFlag::default();
        let removed = SettleFlag::default();
        registry.insert(loaded.clone(), "loaded");
        registry.insert(pending.clone(), "pending");
        registry.insert(removed, "removed");

        assert!(registry.prune(|_| false).is_empty());
        assert_eq!(registry.len(), 3);

        loaded.settle();
        let released = registry.prune(|entry| *entry == "removed");
        assert_eq!(released, ["loaded", "removed"]);
        assert_eq!(registry.len(), 1);

        pending.settle();
        pending.settle();
        assert_eq!(registry.prune(|_| false), ["pending"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn drain_releases_everything() {
        let mut registry = SettlingRegistry::default();
        registry.insert(SettleFlag::default(), 1);
        registry.insert(SettleFlag::default(), 2);

        assert_eq!(registry.drain(), [1, 2]);
        assert!(registry.is_empty());
        assert!(registry.prune(|_| true).is_empty());
    }

    #[test]
    fn tag_names_map_case_insensitively() {
        assert_eq!(DeferredMedia::from_tag_name("img"), Some(DeferredMedia::Image));
        assert_eq!(DeferredMedia::from_tag_name("VIDEO"), Some(DeferredMedia::Video));
        assert_eq!(DeferredMedia::from_tag_name("DIV"), None);
    }
}
