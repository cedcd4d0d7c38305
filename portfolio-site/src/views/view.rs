use constants::dom;

use super::about::about_markup;
use super::detail::project_detail_markup;
use super::grid::project_grid_markup;
use crate::dom::surface::DomSurface;
use crate::engine::assets::project::Project;
use crate::error::SiteResult;
use crate::routing::location::Category;

/// The three top-level views. Exactly one is visible once a transition ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Grid,
    Detail,
    About,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Grid, ViewKind::Detail, ViewKind::About];

    /// Element toggled visible/hidden for this view.
    pub fn container(&self) -> &'static str {
        match self {
            Self::Grid => dom::GRID_VIEW,
            Self::Detail => dom::DETAIL_VIEW,
            Self::About => dom::ABOUT_VIEW,
        }
    }

    /// Element the view's markup is written into.
    pub fn content_target(&self) -> &'static str {
        match self {
            Self::Grid => dom::GRID_CONTAINER,
            Self::Detail => dom::DETAIL_VIEW,
            Self::About => dom::ABOUT_TEXT,
        }
    }
}

/// A view together with the data it renders.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Grid {
        category: Category,
        projects: Vec<Project>,
    },
    Detail(Project),
    About,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Grid { .. } => ViewKind::Grid,
            Self::Detail(_) => ViewKind::Detail,
            Self::About => ViewKind::About,
        }
    }

    /// Grid of `category`, keeping catalog order.
    pub fn grid(category: Category, catalog: &[Project]) -> Self {
        Self::Grid {
            category,
            projects: catalog
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect(),
        }
    }

    pub fn markup(&self, media_root: &str) -> String {
        match self {
            Self::Grid { projects, .. } => project_grid_markup(media_root, projects),
            Self::Detail(project) => project_detail_markup(media_root, project),
            Self::About => about_markup().to_string(),
        }
    }
}

/// Write `view` into its content target.
pub fn render_view(view: &View, surface: &mut dyn DomSurface, media_root: &str) -> SiteResult<()> {
    surface.set_inner_html(view.kind().content_target(), &view.markup(media_root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::surface::RecordingDom;
    use crate::engine::assets::project::fixtures::project;
    use crate::error::SiteError;

    #[test]
    fn grid_filters_by_category_in_order() {
        let catalog = vec![
            project("a", Category::Work),
            project("b", Category::Project),
            project("c", Category::Work),
        ];
        let View::Grid { projects, .. } = View::grid(Category::Work, &catalog) else {
            panic!("expected grid");
        };
        let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn render_writes_into_content_target() {
        let mut surface = RecordingDom::site_shell();
        render_view(&View::About, &mut surface, "/media/projects").unwrap();
        assert!(surface.inner_html(dom::ABOUT_TEXT).unwrap().contains("<h1>"));
        assert_eq!(surface.inner_html(dom::ABOUT_VIEW).as_deref(), Some(""));
    }

    #[test]
    fn missing_container_is_reported() {
        let mut surface = RecordingDom::with_elements(&[dom::GRID_VIEW]);
        let view = View::grid(Category::Work, &[]);
        assert_eq!(
            render_view(&view, &mut surface, "/media/projects"),
            Err(SiteError::missing(dom::GRID_CONTAINER))
        );
    }
}
