use bevy::prelude::*;

use super::markup::escape_html;
use super::media_resolver::resolve_thumbnail_path;
use crate::engine::assets::project::{MediaKind, Project};

fn thumbnail_markup(media_root: &str, project: &Project) -> String {
    let src = escape_html(&resolve_thumbnail_path(media_root, project));
    match project.thumbnail.kind {
        MediaKind::Video => format!(
            r#"<video src="{src}" class="project-card-video" autoplay loop muted playsinline></video>"#
        ),
        MediaKind::Image | MediaKind::Gif => {
            format!(r#"<img src="{src}" class="project-card-image" alt="">"#)
        }
        MediaKind::Unsupported => {
            warn!("Unsupported thumbnail type for {}", project.id);
            String::new()
        }
    }
}

fn project_card(media_root: &str, project: &Project) -> String {
    format!(
        r#"<div class="project-card" data-id="{id}" data-category="{category}">
  <div class="project-card-media-wrapper">{media}</div>
  <div class="project-card-content">
    <h3 class="project-card-title">{title}</h3>
    <p class="project-card-client">{client}</p>
  </div>
</div>"#,
        id = escape_html(&project.id),
        category = project.category.as_segment(),
        media = thumbnail_markup(media_root, project),
        title = escape_html(&project.title),
        client = escape_html(&project.client),
    )
}

/// Markup for a grid of project cards, one per project in input order.
pub fn project_grid_markup(media_root: &str, projects: &[Project]) -> String {
    projects
        .iter()
        .map(|project| project_card(media_root, project))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::project::fixtures::project;
    use crate::routing::location::Category;

    #[test]
    fn renders_one_card_per_project_in_order() {
        let projects = vec![project("a", Category::Work), project("b", Category::Project)];
        let html = project_grid_markup("/media/projects", &projects);

        assert_eq!(html.matches(r#"class="project-card""#).count(), 2);
        let a = html.find(r#"data-id="a""#).unwrap();
        let b = html.find(r#"data-id="b""#).unwrap();
        assert!(a < b);
        assert!(html.contains(r#"data-category="project""#));
        assert!(html.contains(r#"src="/media/projects/a/thumb.jpg""#));
    }

    #[test]
    fn video_thumbnails_autoplay_muted() {
        let mut p = project("v", Category::Work);
        p.thumbnail.kind = MediaKind::Video;
        p.thumbnail.path = "loop.mp4".into();
        let html = project_grid_markup("/media/projects", &[p]);
        assert!(html.contains("autoplay loop muted playsinline"));
    }

    #[test]
    fn unsupported_thumbnail_renders_card_without_media() {
        let mut p = project("m", Category::Work);
        p.thumbnail.kind = MediaKind::Unsupported;
        let html = project_grid_markup("/media/projects", &[p]);
        assert!(html.contains(r#"<div class="project-card-media-wrapper"></div>"#));
    }

    #[test]
    fn empty_catalog_renders_empty_grid() {
        assert_eq!(project_grid_markup("/media/projects", &[]), "");
    }
}
