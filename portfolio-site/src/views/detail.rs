use bevy::prelude::*;

use super::markup::{escape_html, text_with_breaks};
use super::media_resolver::resolve_gallery_paths;
use crate::engine::assets::project::{MediaItem, MediaKind, Project};

fn gallery_item(item: &MediaItem) -> Option<String> {
    let src = escape_html(&item.path);
    let media = match item.kind {
        MediaKind::Video => {
            format!(r#"<video data-src="{src}" controls playsinline muted></video>"#)
        }
        MediaKind::Image | MediaKind::Gif => {
            let alt = escape_html(item.caption.as_deref().unwrap_or("Project image"));
            format!(r#"<img data-src="{src}" alt="{alt}">"#)
        }
        MediaKind::Unsupported => {
            warn!("Skipping gallery item with unsupported type: {}", item.path);
            return None;
        }
    };

    let layout = item
        .layout
        .as_deref()
        .map(|layout| format!(" gallery-item--{}", escape_html(layout)))
        .unwrap_or_default();
    let caption = item
        .caption
        .as_deref()
        .map(|caption| format!("<figcaption>{}</figcaption>", escape_html(caption)))
        .unwrap_or_default();

    Some(format!(
        r#"<figure class="gallery-item{layout}">{media}{caption}</figure>"#
    ))
}

fn meta_item(label: &str, value: &str) -> String {
    format!(
        r#"<div class="meta-item"><strong>{label}</strong><span>{}</span></div>"#,
        escape_html(value)
    )
}

/// Markup for a project's detail page. Gallery media carry `data-src` so the
/// lazy loader fetches them as they approach the viewport.
pub fn project_detail_markup(media_root: &str, project: &Project) -> String {
    let tags: String = project
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
        .collect();
    let gallery: String = resolve_gallery_paths(media_root, project)
        .iter()
        .filter_map(gallery_item)
        .collect();

    format!(
        r#"<div class="project-detail">
  <header class="project-detail-header">
    <h1 class="project-detail-title">{title}</h1>
    <button class="back-button">← Back to Grid</button>
  </header>
  <div class="project-detail-content">
    <aside class="project-meta">
      {client}
      {year}
      {role}
      <div class="meta-item"><strong>Tags</strong><div class="project-tags">{tags}</div></div>
    </aside>
    <main class="project-story"><p>{body}</p></main>
  </div>
  <div class="project-detail-gallery">{gallery}</div>
</div>"#,
        title = escape_html(&project.title),
        client = meta_item("Client", &project.client),
        year = meta_item("Year", &project.year),
        role = meta_item("Role", &project.role),
        body = text_with_breaks(&project.body),
    )
}
