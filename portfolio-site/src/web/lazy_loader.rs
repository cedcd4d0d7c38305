use std::cell::RefCell;
use std::rc::Rc;

use bevy::prelude::*;
use constants::dom::{DEFERRED_SOURCE_ATTR, class};
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, HtmlImageElement, HtmlVideoElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use super::describe;
use crate::dom::lazy_media::{
    AutoplayPolicy, DeferredMedia, LazyLoadSettings, MediaObserver, SettleFlag, SettlingRegistry,
    video_fallback_poster,
};
use crate::error::{SiteError, SiteResult};

const UNAVAILABLE_ALT: &str = "Video unavailable";
const UNAVAILABLE_BACKGROUND: &str = "var(--color-border)";

/// Load and error listeners of one element.
struct MediaListeners {
    element: Element,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl MediaListeners {
    fn detach(&self) {
        for (event, listener) in &self.listeners {
            let _ = self
                .element
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
    }
}

type Handler = Box<dyn FnMut(Event)>;

/// Listeners of every element revealed so far.
#[derive(Clone, Default)]
struct ListenerRegistry(Rc<RefCell<SettlingRegistry<MediaListeners>>>);

impl ListenerRegistry {
    fn track(&self, element: &Element, handlers: Vec<(&'static str, Handler)>) {
        let flag = SettleFlag::default();
        let mut tracked = MediaListeners {
            element: element.clone(),
            listeners: Vec::with_capacity(handlers.len()),
        };

        for (event, mut handler) in handlers {
            let flag = flag.clone();
            let listener = Closure::wrap(Box::new(move |e: Event| {
                flag.settle();
                handler(e);
            }) as Box<dyn FnMut(Event)>);
            match element.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            {
                Ok(()) => tracked.listeners.push((event, listener)),
                Err(e) => warn!("Could not listen for {}: {}", event, describe(&e)),
            }
        }
        self.0.borrow_mut().insert(flag, tracked);
    }

    /// Drop listeners whose element has loaded, failed or left the page.
    fn prune(&self) {
        let released = self
            .0
            .borrow_mut()
            .prune(|tracked| !tracked.element.is_connected());
        for tracked in released {
            tracked.detach();
        }
    }

    fn clear(&self) {
        let released = self.0.borrow_mut().drain();
        for tracked in released {
            tracked.detach();
        }
    }
}

/// One `IntersectionObserver` shared by every rendered view.
pub struct BrowserMediaObserver {
    document: Document,
    observer: IntersectionObserver,
    listeners: ListenerRegistry,
    // Held so the observer callback outlives every registration.
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl BrowserMediaObserver {
    pub fn new(settings: LazyLoadSettings, mobile_breakpoint_px: f32) -> SiteResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| SiteError::dom("window", "no window in this context"))?;
        let document = window
            .document()
            .ok_or_else(|| SiteError::dom("document", "no document in this context"))?;

        let listeners = ListenerRegistry::default();
        let registry = listeners.clone();
        let on_intersect = move |entries: Array, observer: IntersectionObserver| {
            registry.prune();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let element = entry.target();
                observer.unobserve(&element);
                reveal(&element, &registry, mobile_breakpoint_px);
            }
        };
        let callback =
            Closure::wrap(Box::new(on_intersect) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&settings.root_margin);
        options.set_threshold(&JsValue::from_f64(settings.threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|e| SiteError::dom("IntersectionObserver", describe(&e)))?;

        Ok(Self {
            document,
            observer,
            listeners,
            _callback: callback,
        })
    }
}

impl MediaObserver for BrowserMediaObserver {
    fn observe_within(&mut self, container: &str) -> SiteResult<usize> {
        self.listeners.prune();
        let root = self
            .document
            .query_selector(container)
            .map_err(|e| SiteError::dom("querySelector", describe(&e)))?
            .ok_or_else(|| SiteError::missing(container))?;
        let deferred = root
            .query_selector_all(&format!("[{DEFERRED_SOURCE_ATTR}]"))
            .map_err(|e| SiteError::dom("querySelectorAll", describe(&e)))?;

        let mut count = 0;
        for index in 0..deferred.length() {
            let Some(element) = deferred
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let _ = element.class_list().add_1(class::LAZY);
            self.observer.observe(&element);
            count += 1;
        }
        Ok(count)
    }

    fn disconnect(&mut self) {
        self.observer.disconnect();
        self.listeners.clear();
    }
}

/// Swap the deferred source in and hook up load/error handling.
fn reveal(element: &Element, listeners: &ListenerRegistry, mobile_breakpoint_px: f32) {
    let Some(src) = element.get_attribute(DEFERRED_SOURCE_ATTR) else {
        warn!("Deferred media without {}", DEFERRED_SOURCE_ATTR);
        return;
    };

    match DeferredMedia::from_tag_name(&element.tag_name()) {
        Some(DeferredMedia::Image) => {
            if let Some(image) = element.dyn_ref::<HtmlImageElement>() {
                reveal_image(image, &src, listeners);
            }
        }
        Some(DeferredMedia::Video) => {
            if let Some(video) = element.dyn_ref::<HtmlVideoElement>() {
                reveal_video(video, &src, listeners, mobile_breakpoint_px);
            }
        }
        None => {
            let _ = element.set_attribute("src", &src);
        }
    }
}

fn reveal_image(image: &HtmlImageElement, src: &str, listeners: &ListenerRegistry) {
    let loaded = image.clone();
    let failed = image.clone();
    let source = src.to_string();
    listeners.track(
        image,
        vec![
            (
                "load",
                Box::new(move |_: Event| {
                    let _ = loaded.class_list().add_1(class::LOADED);
                    let _ = loaded.remove_attribute(DEFERRED_SOURCE_ATTR);
                }) as Handler,
            ),
            (
                "error",
                Box::new(move |_: Event| {
                    let _ = failed.class_list().add_1(class::ERROR);
                    warn!("Image failed to load: {}", source);
                }) as Handler,
            ),
        ],
    );

    image.set_src(src);
}

fn reveal_video(
    video: &HtmlVideoElement,
    src: &str,
    listeners: &ListenerRegistry,
    mobile_breakpoint_px: f32,
) {
    video.set_preload("metadata");

    let ready = video.clone();
    let failed = video.clone();
    let source = src.to_string();
    let registry = listeners.clone();
    listeners.track(
        video,
        vec![
            (
                "loadedmetadata",
                Box::new(move |_: Event| {
                    // A reload after refused autoplay fires this again.
                    if !ready.has_attribute(DEFERRED_SOURCE_ATTR) {
                        return;
                    }
                    let _ = ready.class_list().add_1(class::LOADED);
                    let _ = ready.remove_attribute(DEFERRED_SOURCE_ATTR);
                    if current_autoplay_policy().allows_autoplay(mobile_breakpoint_px) {
                        autoplay(&ready);
                    }
                }) as Handler,
            ),
            (
                "error",
                Box::new(move |_: Event| {
                    let _ = failed.class_list().add_1(class::ERROR);
                    warn!("Video failed to load: {}", source);
                    replace_with_poster(&failed, &video_fallback_poster(&source), &registry);
                }) as Handler,
            ),
        ],
    );

    video.set_src(src);
    video.load();
}

/// Start muted playback; a refused play reloads so the first frame shows.
fn autoplay(video: &HtmlVideoElement) {
    video.set_muted(true);
    let promise = match video.play() {
        Ok(promise) => promise,
        Err(e) => {
            debug!("Autoplay refused: {}", describe(&e));
            video.load();
            return;
        }
    };
    let video = video.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            debug!("Autoplay refused: {}", describe(&e));
            video.load();
        }
    });
}

fn replace_with_poster(video: &HtmlVideoElement, poster: &str, listeners: &ListenerRegistry) {
    let Some(document) = video.owner_document() else {
        return;
    };
    let image = match document
        .create_element("img")
        .map(|element| element.dyn_into::<HtmlImageElement>())
    {
        Ok(Ok(image)) => image,
        Ok(Err(_)) => return,
        Err(e) => {
            warn!("Could not create poster image: {}", describe(&e));
            return;
        }
    };

    image.set_class_name(&video.class_name());
    image.style().set_css_text(&video.style().css_text());
    let unavailable = image.clone();
    listeners.track(
        &image,
        vec![(
            "error",
            Box::new(move |_: Event| {
                let _ = unavailable
                    .style()
                    .set_property("background", UNAVAILABLE_BACKGROUND);
                unavailable.set_alt(UNAVAILABLE_ALT);
            }) as Handler,
        )],
    );
    image.set_src(poster);

    if let Err(e) = video.replace_with_with_node_1(&image) {
        warn!("Could not swap in poster: {}", describe(&e));
    }
}

fn current_autoplay_policy() -> AutoplayPolicy {
    let Some(window) = web_sys::window() else {
        return AutoplayPolicy {
            prefers_reduced_motion: true,
            viewport_width: 0.0,
            effective_connection: None,
        };
    };

    AutoplayPolicy {
        prefers_reduced_motion: prefers_reduced_motion(&window),
        viewport_width: window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default() as f32,
        effective_connection: effective_connection(&window),
    }
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// `navigator.connection` is not in every browser, so it is read reflectively.
fn effective_connection(window: &Window) -> Option<String> {
    let connection = Reflect::get(&window.navigator(), &JsValue::from_str("connection")).ok()?;
    if connection.is_undefined() || connection.is_null() {
        return None;
    }
    Reflect::get(&connection, &JsValue::from_str("effectiveType"))
        .ok()?
        .as_string()
}
