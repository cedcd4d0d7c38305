use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use bevy::prelude::*;
use constants::dom::{BACK_BUTTON, MAIN_HEADER, NOTIFICATION, PROJECT_CARD};
use constants::routes;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, MouseEvent};

use super::describe;
use crate::dom::notification::{DismissNotification, parse_notification_element_id};
use crate::error::{SiteError, SiteResult};
use crate::routing::history::NavigationRequest;
use crate::routing::location::{Category, internal_link};

/// What a click on the page asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Navigate(String),
    Dismiss(u64),
}

/// Document-level click listener feeding a queue drained once per frame.
pub struct PageInput {
    queue: Rc<RefCell<VecDeque<PageAction>>>,
    _listener: Closure<dyn FnMut(MouseEvent)>,
}

impl PageInput {
    pub fn install() -> SiteResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SiteError::dom("document", "no document in this context"))?;

        let queue = Rc::new(RefCell::new(VecDeque::new()));
        let sink = queue.clone();
        let listener = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(target) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
            else {
                return;
            };
            if let Some(action) = classify_click(&target, &event) {
                sink.borrow_mut().push_back(action);
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        document
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(|e| SiteError::dom("addEventListener(click)", describe(&e)))?;

        Ok(Self {
            queue,
            _listener: listener,
        })
    }
}

fn closest(target: &Element, selector: &str) -> Option<Element> {
    target.closest(selector).ok().flatten()
}

fn classify_click(target: &Element, event: &MouseEvent) -> Option<PageAction> {
    if let Some(card) = closest(target, PROJECT_CARD) {
        let id = card.get_attribute("data-id")?;
        let category = card
            .get_attribute("data-category")
            .and_then(|segment| Category::from_segment(&segment))?;
        return Some(PageAction::Navigate(category.detail_path(&id)));
    }

    if closest(target, BACK_BUTTON).is_some() {
        event.prevent_default();
        return Some(PageAction::Navigate(routes::HOME.to_string()));
    }

    if let Some(link) = closest(target, &format!("{MAIN_HEADER} a")) {
        let href = link.get_attribute("href")?;
        let path = internal_link(&href)?;
        event.prevent_default();
        return Some(PageAction::Navigate(path.to_string()));
    }

    if let Some(toast) = closest(target, NOTIFICATION) {
        return parse_notification_element_id(&toast.id()).map(PageAction::Dismiss);
    }

    None
}

pub fn drain_page_input(
    input: NonSend<PageInput>,
    mut navigation: EventWriter<NavigationRequest>,
    mut dismissals: EventWriter<DismissNotification>,
) {
    let actions: Vec<PageAction> = input.queue.borrow_mut().drain(..).collect();
    for action in actions {
        match action {
            PageAction::Navigate(path) => {
                navigation.write(NavigationRequest::to(path));
            }
            PageAction::Dismiss(id) => {
                dismissals.write(DismissNotification { id });
            }
        }
    }
}
