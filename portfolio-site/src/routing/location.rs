use constants::routes;
use serde::{Deserialize, Serialize};

/// Which grid a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Project,
}

impl Category {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            routes::WORK_SEGMENT => Some(Self::Work),
            routes::PROJECT_SEGMENT => Some(Self::Project),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> &'static str {
        match self {
            Self::Work => routes::WORK_SEGMENT,
            Self::Project => routes::PROJECT_SEGMENT,
        }
    }

    /// Grid listed at a top-level path. Only `/projects` selects personal
    /// projects; every other path falls back to client work.
    pub fn for_listing(path: &str) -> Self {
        if path == routes::PROJECTS {
            Self::Project
        } else {
            Self::Work
        }
    }

    /// Location of a project's detail page.
    pub fn detail_path(&self, project_id: &str) -> String {
        format!("/{}/{}", self.as_segment(), project_id)
    }
}

/// Category and id of a detail page. Both are always present together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailTarget {
    pub category: Category,
    pub project_id: String,
}

/// Structured form of a URL path used to pick a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub path: String,
    pub detail: Option<DetailTarget>,
}

impl Route {
    pub fn top_level(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            detail: None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.detail.as_ref().map(|d| d.category)
    }

    pub fn project_id(&self) -> Option<&str> {
        self.detail.as_ref().map(|d| d.project_id.as_str())
    }

    pub fn is_about(&self) -> bool {
        self.detail.is_none() && self.path == routes::ABOUT
    }
}

/// Parse a location path into a [`Route`].
///
/// `/work/{id}` and `/project/{id}` become detail routes whose `path` is the
/// category prefix. Everything else, including malformed input, is a
/// top-level route carrying the raw path.
pub fn parse_location(path: &str) -> Route {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if let [first, id] = segments.as_slice() {
        if let Some(category) = Category::from_segment(first) {
            return Route {
                path: format!("/{first}"),
                detail: Some(DetailTarget {
                    category,
                    project_id: (*id).to_string(),
                }),
            };
        }
    }

    if path.is_empty() {
        Route::top_level(routes::HOME)
    } else {
        Route::top_level(path)
    }
}

/// Same-origin path of an anchor `href`, if the link should be routed
/// client-side. Protocol-relative and external links are left to the browser.
pub fn internal_link(href: &str) -> Option<&str> {
    (href.starts_with('/') && !href.starts_with("//")).then_some(href)
}
