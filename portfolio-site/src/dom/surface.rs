use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use crate::dom::notification::NotificationLevel;
use crate::error::{SiteError, SiteResult};

/// The slice of the DOM the view layer writes to. Elements are addressed by
/// CSS selector.
pub trait DomSurface {
    fn set_inner_html(&mut self, selector: &str, html: &str) -> SiteResult<()>;

    fn set_class(&mut self, selector: &str, class: &str, enabled: bool) -> SiteResult<()>;

    /// Force a synchronous layout flush so a following class change animates
    /// from the current state.
    fn force_reflow(&mut self, selector: &str) -> SiteResult<()>;

    fn mount_notification(
        &mut self,
        id: u64,
        message: &str,
        level: NotificationLevel,
    ) -> SiteResult<()>;

    fn set_notification_visible(&mut self, id: u64, visible: bool) -> SiteResult<()>;

    fn remove_notification(&mut self, id: u64);
}

/// Non-send resource holding the active DOM surface.
pub struct DomHost(Box<dyn DomSurface>);

impl DomHost {
    pub fn new(surface: impl DomSurface + 'static) -> Self {
        Self(Box::new(surface))
    }

    pub fn surface_mut(&mut self) -> &mut dyn DomSurface {
        self.0.as_mut()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordedElement {
    pub inner_html: String,
    pub classes: BTreeSet<String>,
    pub reflows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNotification {
    pub message: String,
    pub level: NotificationLevel,
    pub visible: bool,
}

#[derive(Debug, Default)]
struct DomModel {
    elements: HashMap<String, RecordedElement>,
    notifications: BTreeMap<u64, RecordedNotification>,
    mounted_notifications: usize,
    mutations: usize,
}

/// In-memory DOM used by native builds and tests.
///
/// Only selectors registered up front exist; everything else reports
/// [`SiteError::MissingElement`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingDom {
    model: Rc<RefCell<DomModel>>,
}

impl RecordingDom {
    pub fn with_elements(selectors: &[&str]) -> Self {
        let dom = Self::default();
        for selector in selectors {
            dom.insert_element(selector);
        }
        dom
    }

    /// Every container the site expects in its page shell.
    pub fn site_shell() -> Self {
        use constants::dom::*;
        Self::with_elements(&[GRID_VIEW, DETAIL_VIEW, ABOUT_VIEW, GRID_CONTAINER, ABOUT_TEXT])
    }

    pub fn insert_element(&self, selector: &str) {
        self.model
            .borrow_mut()
            .elements
            .entry(selector.to_string())
            .or_default();
    }

    pub fn element(&self, selector: &str) -> Option<RecordedElement> {
        self.model.borrow().elements.get(selector).cloned()
    }

    pub fn inner_html(&self, selector: &str) -> Option<String> {
        self.element(selector).map(|e| e.inner_html)
    }

    pub fn has_class(&self, selector: &str, class: &str) -> bool {
        self.model
            .borrow()
            .elements
            .get(selector)
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Count of writes made through the surface.
    pub fn mutation_count(&self) -> usize {
        self.model.borrow().mutations
    }

    pub fn notifications(&self) -> Vec<(u64, RecordedNotification)> {
        self.model
            .borrow()
            .notifications
            .iter()
            .map(|(id, n)| (*id, n.clone()))
            .collect()
    }

    /// Total notifications ever mounted, including removed ones.
    pub fn mounted_notification_count(&self) -> usize {
        self.model.borrow().mounted_notifications
    }

    fn with_element<R>(
        &mut self,
        selector: &str,
        f: impl FnOnce(&mut RecordedElement) -> R,
    ) -> SiteResult<R> {
        let mut model = self.model.borrow_mut();
        let element = model
            .elements
            .get_mut(selector)
            .ok_or_else(|| SiteError::missing(selector))?;
        let result = f(element);
        model.mutations += 1;
        Ok(result)
    }
}

impl DomSurface for RecordingDom {
    fn set_inner_html(&mut self, selector: &str, html: &str) -> SiteResult<()> {
        self.with_element(selector, |e| e.inner_html = html.to_string())
    }

    fn set_class(&mut self, selector: &str, class: &str, enabled: bool) -> SiteResult<()> {
        self.with_element(selector, |e| {
            if enabled {
                e.classes.insert(class.to_string());
            } else {
                e.classes.remove(class);
            }
        })
    }

    fn force_reflow(&mut self, selector: &str) -> SiteResult<()> {
        self.with_element(selector, |e| e.reflows += 1)
    }

    fn mount_notification(
        &mut self,
        id: u64,
        message: &str,
        level: NotificationLevel,
    ) -> SiteResult<()> {
        let mut model = self.model.borrow_mut();
        model.notifications.insert(
            id,
            RecordedNotification {
                message: message.to_string(),
                level,
                visible: false,
            },
        );
        model.mounted_notifications += 1;
        model.mutations += 1;
        Ok(())
    }

    fn set_notification_visible(&mut self, id: u64, visible: bool) -> SiteResult<()> {
        let mut model = self.model.borrow_mut();
        let notification = model
            .notifications
            .get_mut(&id)
            .ok_or_else(|| SiteError::missing(&format!("#notification-{id}")))?;
        notification.visible = visible;
        model.mutations += 1;
        Ok(())
    }

    fn remove_notification(&mut self, id: u64) {
        let mut model = self.model.borrow_mut();
        if model.notifications.remove(&id).is_some() {
            model.mutations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_selectors_report_missing_element() {
        let mut dom = RecordingDom::with_elements(&["#grid-view"]);
        assert_eq!(
            dom.set_inner_html("#nope", "<p></p>"),
            Err(SiteError::missing("#nope"))
        );
        assert_eq!(dom.mutation_count(), 0);
    }

    #[test]
    fn class_toggles_are_recorded() {
        let mut dom = RecordingDom::with_elements(&["#grid-view"]);
        dom.set_class("#grid-view", "hidden", true).unwrap();
        assert!(dom.has_class("#grid-view", "hidden"));
        dom.set_class("#grid-view", "hidden", false).unwrap();
        assert!(!dom.has_class("#grid-view", "hidden"));
        assert_eq!(dom.mutation_count(), 2);
    }
}
