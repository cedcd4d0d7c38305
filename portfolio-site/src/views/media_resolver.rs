use crate::engine::assets::project::{MediaItem, Project};

/// Map a project-relative media path to its location under `media_root`.
/// Paths already under `media_root` (the older flat data format) pass through.
pub fn resolve_media_path(media_root: &str, project_id: &str, path: &str) -> String {
    let root = media_root.trim_end_matches('/');
    if path
        .strip_prefix(root)
        .is_some_and(|rest| rest.starts_with('/'))
    {
        return path.to_string();
    }
    format!("{root}/{project_id}/{}", path.trim_start_matches('/'))
}

pub fn resolve_thumbnail_path(media_root: &str, project: &Project) -> String {
    resolve_media_path(media_root, &project.id, &project.thumbnail.path)
}

/// Gallery items of `project` with resolved paths, in input order.
pub fn resolve_gallery_paths(media_root: &str, project: &Project) -> Vec<MediaItem> {
    project
        .media_gallery
        .iter()
        .map(|item| MediaItem {
            path: resolve_media_path(media_root, &project.id, &item.path),
            ..item.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::project::MediaKind;
    use crate::engine::assets::project::fixtures::project;
    use crate::routing::location::Category;

    const ROOT: &str = "/media/projects";

    #[test]
    fn relative_paths_nest_under_project_folder() {
        assert_eq!(
            resolve_media_path(ROOT, "lumen", "gallery/01.jpg"),
            "/media/projects/lumen/gallery/01.jpg"
        );
    }

    #[test]
    fn legacy_absolute_paths_pass_through() {
        assert_eq!(
            resolve_media_path(ROOT, "lumen", "/media/projects/old/cover.png"),
            "/media/projects/old/cover.png"
        );
        assert_eq!(
            resolve_media_path(ROOT, "lumen", "/media/projects-archive/x.png"),
            "/media/projects/lumen/media/projects-archive/x.png"
        );
    }

    #[test]
    fn gallery_resolution_keeps_order_and_metadata() {
        let mut p = project("a", Category::Work);
        p.media_gallery = vec![
            MediaItem {
                kind: MediaKind::Video,
                path: "v.mp4".into(),
                caption: Some("Clip".into()),
                layout: None,
            },
            MediaItem {
                kind: MediaKind::Image,
                path: "/media/projects/a/i.jpg".into(),
                caption: None,
                layout: Some("wide".into()),
            },
        ];

        let gallery = resolve_gallery_paths(ROOT, &p);
        assert_eq!(gallery[0].path, "/media/projects/a/v.mp4");
        assert_eq!(gallery[0].caption.as_deref(), Some("Clip"));
        assert_eq!(gallery[1].path, "/media/projects/a/i.jpg");
        assert_eq!(resolve_thumbnail_path(ROOT, &p), "/media/projects/a/thumb.jpg");
    }
}
