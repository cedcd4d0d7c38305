use std::cell::RefCell;
use std::rc::Rc;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::location::{Route, parse_location};
use crate::error::SiteResult;

/// Browser-history capability the router needs.
pub trait HistoryBackend {
    /// Path of the live location.
    fn current_path(&self) -> String;

    /// Push a new entry without reloading the page.
    fn push(&mut self, path: &str) -> SiteResult<()>;

    /// Number of back/forward traversals since the last call.
    fn take_pop_events(&mut self) -> usize;
}

/// Non-send resource holding the active history backend.
pub struct HistoryHost(Box<dyn HistoryBackend>);

impl HistoryHost {
    pub fn new(backend: impl HistoryBackend + 'static) -> Self {
        Self(Box::new(backend))
    }

    pub fn current_location(&self) -> Route {
        parse_location(&self.0.current_path())
    }

    pub fn backend_mut(&mut self) -> &mut dyn HistoryBackend {
        self.0.as_mut()
    }
}

/// A navigation happened. Carries no payload; readers re-read the location.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LocationChanged;

/// Request to navigate to `path`, handled by [`apply_navigation_requests`].
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
}

impl NavigationRequest {
    pub fn to(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// History adapter: push and broadcast in one step.
#[derive(SystemParam)]
pub struct Router<'w> {
    history: NonSendMut<'w, HistoryHost>,
    changes: EventWriter<'w, LocationChanged>,
}

impl Router<'_> {
    /// Push `path` and notify listeners within the same system run.
    pub fn navigate_to(&mut self, path: &str) {
        if let Err(e) = self.history.backend_mut().push(path) {
            error!("Navigation to {} dropped: {}", path, e);
            return;
        }
        debug!("Navigated to {}", path);
        self.changes.write(LocationChanged);
    }

    pub fn current_location(&self) -> Route {
        self.history.current_location()
    }
}

/// Forward queued navigation requests to the router.
pub fn apply_navigation_requests(
    mut requests: EventReader<NavigationRequest>,
    mut router: Router,
) {
    for request in requests.read() {
        router.navigate_to(&request.path);
    }
}

/// Turn back/forward traversals into change notifications.
pub fn poll_history(
    mut history: NonSendMut<HistoryHost>,
    mut changes: EventWriter<LocationChanged>,
) {
    let pops = history.backend_mut().take_pop_events();
    for _ in 0..pops {
        changes.write(LocationChanged);
    }
}

#[derive(Debug)]
struct MemoryHistoryState {
    entries: Vec<String>,
    index: usize,
    pending_pops: usize,
}

/// In-memory history used by native builds and tests.
///
/// Clones share the same stack, so a test can keep one handle to press
/// "back" while the app owns another.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    state: Rc<RefCell<MemoryHistoryState>>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::starting_at("/")
    }
}

impl MemoryHistory {
    pub fn starting_at(path: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoryHistoryState {
                entries: vec![path.to_string()],
                index: 0,
                pending_pops: 0,
            })),
        }
    }

    /// Step back one entry, like the browser back button. Returns false at
    /// the start of the stack.
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.index == 0 {
            return false;
        }
        state.index -= 1;
        state.pending_pops += 1;
        true
    }

    pub fn forward(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.index + 1 >= state.entries.len() {
            return false;
        }
        state.index += 1;
        state.pending_pops += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryBackend for MemoryHistory {
    fn current_path(&self) -> String {
        let state = self.state.borrow();
        state.entries[state.index].clone()
    }

    fn push(&mut self, path: &str) -> SiteResult<()> {
        let mut state = self.state.borrow_mut();
        let next = state.index + 1;
        state.entries.truncate(next);
        state.entries.push(path.to_string());
        state.index = next;
        Ok(())
    }

    fn take_pop_events(&mut self) -> usize {
        std::mem::take(&mut self.state.borrow_mut().pending_pops)
    }
}
