/// Asset path of the project list, relative to the web root.
pub const PROJECTS_DATA_PATH: &str = "data/projects.json";

/// Root under which every project keeps its own media folder.
pub const MEDIA_ROOT: &str = "/media/projects";

/// Start loading 200px before an element scrolls into view.
pub const LAZY_ROOT_MARGIN: &str = "0px 0px 200px 0px";

/// Fraction of the element that must intersect the margin box.
pub const LAZY_THRESHOLD: f64 = 0.1;

/// Viewports at or below this width count as mobile.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Extensions swapped for `.jpg` when a video falls back to its poster.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];
