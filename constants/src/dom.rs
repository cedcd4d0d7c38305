/// Canvas the background scene renders into.
pub const BACKGROUND_CANVAS: &str = ".webgl-canvas";

pub const GRID_VIEW: &str = "#grid-view";
pub const DETAIL_VIEW: &str = "#detail-view";
pub const ABOUT_VIEW: &str = "#about-view";

/// Grid cards are written here rather than into the grid view itself so the
/// view can keep its own heading markup.
pub const GRID_CONTAINER: &str = "#work-grid-container";

/// Text column inside the about view.
pub const ABOUT_TEXT: &str = "#about-view .about-text";

/// Header holding the top-level navigation links.
pub const MAIN_HEADER: &str = ".main-header";

pub const PROJECT_CARD: &str = ".project-card";
pub const BACK_BUTTON: &str = ".back-button";
pub const NOTIFICATION: &str = ".notification";

/// Attribute carrying a deferred media source until the element nears the viewport.
pub const DEFERRED_SOURCE_ATTR: &str = "data-src";

pub mod class {
    pub const HIDDEN: &str = "hidden";
    pub const EXITING: &str = "is-exiting";
    pub const ENTERING: &str = "is-entering";
    pub const VISIBLE: &str = "visible";
    pub const LAZY: &str = "lazy";
    pub const LOADED: &str = "loaded";
    pub const ERROR: &str = "error";
}
