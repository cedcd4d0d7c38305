/// Landing page, shows the `work` grid.
pub const HOME: &str = "/";

/// Personal projects grid.
pub const PROJECTS: &str = "/projects";

/// About page with the interactive scene.
pub const ABOUT: &str = "/about";

/// First path segment of a client work detail page (`/work/{id}`).
pub const WORK_SEGMENT: &str = "work";

/// First path segment of a personal project detail page (`/project/{id}`).
pub const PROJECT_SEGMENT: &str = "project";
