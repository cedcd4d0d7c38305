use constants::dom::{NOTIFICATION, class};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::describe;
use crate::dom::notification::{NotificationLevel, notification_element_id};
use crate::dom::surface::DomSurface;
use crate::error::{SiteError, SiteResult};

pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new() -> SiteResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SiteError::dom("document", "no document in this context"))?;
        Ok(Self { document })
    }

    fn element(&self, selector: &str) -> SiteResult<Element> {
        self.document
            .query_selector(selector)
            .map_err(|e| SiteError::dom("querySelector", describe(&e)))?
            .ok_or_else(|| SiteError::missing(selector))
    }

    fn notification(&self, id: u64) -> SiteResult<Element> {
        let element_id = notification_element_id(id);
        self.document
            .get_element_by_id(&element_id)
            .ok_or_else(|| SiteError::missing(&format!("#{element_id}")))
    }
}

impl DomSurface for BrowserDom {
    fn set_inner_html(&mut self, selector: &str, html: &str) -> SiteResult<()> {
        self.element(selector)?.set_inner_html(html);
        Ok(())
    }

    fn set_class(&mut self, selector: &str, class: &str, enabled: bool) -> SiteResult<()> {
        self.element(selector)?
            .class_list()
            .toggle_with_force(class, enabled)
            .map(|_| ())
            .map_err(|e| SiteError::dom("classList.toggle", describe(&e)))
    }

    fn force_reflow(&mut self, selector: &str) -> SiteResult<()> {
        let element = self.element(selector)?;
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| SiteError::dom("reflow", format!("{selector} is not an HTML element")))?;
        // Reading layout flushes pending style changes.
        let _ = html.offset_height();
        Ok(())
    }

    fn mount_notification(
        &mut self,
        id: u64,
        message: &str,
        level: NotificationLevel,
    ) -> SiteResult<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| SiteError::missing("body"))?;
        let toast = self
            .document
            .create_element("div")
            .map_err(|e| SiteError::dom("createElement", describe(&e)))?;

        let base = NOTIFICATION.trim_start_matches('.');
        toast.set_id(&notification_element_id(id));
        toast.set_class_name(&format!("{base} {base}--{}", level.as_str()));
        toast.set_text_content(Some(message));
        body.append_child(&toast)
            .map_err(|e| SiteError::dom("appendChild", describe(&e)))?;
        Ok(())
    }

    fn set_notification_visible(&mut self, id: u64, visible: bool) -> SiteResult<()> {
        self.notification(id)?
            .class_list()
            .toggle_with_force(class::VISIBLE, visible)
            .map(|_| ())
            .map_err(|e| SiteError::dom("classList.toggle", describe(&e)))
    }

    fn remove_notification(&mut self, id: u64) {
        if let Ok(toast) = self.notification(id) {
            toast.remove();
        }
    }
}
