use std::cell::Cell;
use std::rc::Rc;

use bevy::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use web_sys::{Event, Window};

use super::describe;
use crate::error::{SiteError, SiteResult};
use crate::routing::history::HistoryBackend;

/// `window.history` plus a counter fed by the `popstate` listener.
pub struct BrowserHistory {
    window: Window,
    pops: Rc<Cell<usize>>,
    // Held so the listener lives as long as the backend.
    _listener: Closure<dyn FnMut(Event)>,
}

impl BrowserHistory {
    pub fn new() -> SiteResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| SiteError::dom("window", "no window in this context"))?;

        let pops = Rc::new(Cell::new(0));
        let counter = pops.clone();
        let listener = Closure::wrap(Box::new(move |_event: Event| {
            counter.set(counter.get() + 1);
        }) as Box<dyn FnMut(Event)>);

        window
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .map_err(|e| SiteError::dom("addEventListener(popstate)", describe(&e)))?;

        Ok(Self {
            window,
            pops,
            _listener: listener,
        })
    }
}

impl HistoryBackend for BrowserHistory {
    fn current_path(&self) -> String {
        self.window.location().pathname().unwrap_or_else(|e| {
            warn!("Could not read location: {}", describe(&e));
            "/".to_string()
        })
    }

    fn push(&mut self, path: &str) -> SiteResult<()> {
        let history = self.window.history().map_err(|e| SiteError::History {
            path: path.to_string(),
            message: describe(&e),
        })?;
        history
            .push_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(|e| SiteError::History {
                path: path.to_string(),
                message: describe(&e),
            })
    }

    fn take_pop_events(&mut self) -> usize {
        self.pops.replace(0)
    }
}
