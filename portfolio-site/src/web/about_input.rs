use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use bevy::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, MouseEvent};

use super::describe;
use crate::engine::scene::{AboutPointerEvent, AboutSceneCommand};

type PointerQueue = Rc<RefCell<VecDeque<AboutPointerEvent>>>;

struct AttachedListeners {
    element: Element,
    listeners: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
}

impl AttachedListeners {
    fn listen(
        &mut self,
        event: &'static str,
        queue: PointerQueue,
        mut translate: impl FnMut(&MouseEvent) -> Option<AboutPointerEvent> + 'static,
    ) {
        let listener = Closure::wrap(Box::new(move |event: MouseEvent| {
            if let Some(pointer) = translate(&event) {
                queue.borrow_mut().push_back(pointer);
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        match self
            .element
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        {
            Ok(()) => self.listeners.push((event, listener)),
            Err(e) => warn!("Could not listen for {}: {}", event, describe(&e)),
        }
    }

    fn detach(self) {
        for (event, listener) in &self.listeners {
            let _ = self
                .element
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
    }
}

/// Pointer listeners bound to the about container while the scene is
/// mounted.
#[derive(Default)]
pub struct AboutPointerListeners {
    queue: PointerQueue,
    attached: Option<AttachedListeners>,
}

impl AboutPointerListeners {
    fn attach(&mut self, container: &str) {
        self.detach();

        let element = match web_sys::window()
            .and_then(|window| window.document())
            .map(|document| document.query_selector(container))
        {
            Some(Ok(Some(element))) => element,
            Some(Err(e)) => {
                warn!("Bad about container {}: {}", container, describe(&e));
                return;
            }
            _ => {
                warn!("About container {} not found", container);
                return;
            }
        };

        let mut attached = AttachedListeners {
            element,
            listeners: Vec::new(),
        };

        let target = attached.element.clone();
        attached.listen("pointermove", self.queue.clone(), move |event| {
            let rect = target.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return None;
            }
            let x = (f64::from(event.client_x()) - rect.left()) / rect.width() * 2.0 - 1.0;
            let y = 1.0 - (f64::from(event.client_y()) - rect.top()) / rect.height() * 2.0;
            Some(AboutPointerEvent::Move(Vec2::new(x as f32, y as f32)))
        });
        attached.listen("pointerdown", self.queue.clone(), |_| {
            Some(AboutPointerEvent::Press)
        });
        for release in ["pointerup", "pointerleave", "pointercancel"] {
            attached.listen(release, self.queue.clone(), |_| {
                Some(AboutPointerEvent::Release)
            });
        }

        debug!("Pointer listeners attached to {}", container);
        self.attached = Some(attached);
    }

    fn detach(&mut self) {
        if let Some(attached) = self.attached.take() {
            attached.detach();
            self.queue.borrow_mut().clear();
            debug!("Pointer listeners removed");
        }
    }
}

pub fn sync_about_listeners(
    mut requests: EventReader<AboutSceneCommand>,
    mut listeners: NonSendMut<AboutPointerListeners>,
) {
    for request in requests.read() {
        match request {
            AboutSceneCommand::Mount { container } => listeners.attach(container),
            AboutSceneCommand::Dispose => listeners.detach(),
        }
    }
}

pub fn drain_about_pointer(
    listeners: NonSend<AboutPointerListeners>,
    mut pointer: EventWriter<AboutPointerEvent>,
) {
    let pending: Vec<AboutPointerEvent> = listeners.queue.borrow_mut().drain(..).collect();
    pointer.write_batch(pending);
}
