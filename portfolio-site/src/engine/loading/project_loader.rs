use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::config::SiteConfig;
use crate::dom::notification::Notification;
use crate::engine::assets::project::Project;
use crate::engine::assets::project_manifest::ProjectManifest;
use crate::engine::core::app_state::SiteState;
use crate::error::SiteError;

/// Shown when the project list cannot be fetched or parsed.
pub const LOAD_FAILURE_MESSAGE: &str = "Projects could not be loaded. Please try again later.";

/// Project list for the session. Written once when loading settles.
#[derive(Resource, Debug, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }
}

#[derive(Resource, Default)]
pub struct ProjectManifestLoader {
    pub handle: Option<Handle<ProjectManifest>>,
}

// Issue the single fetch of the project list.
pub fn start_loading(
    mut loader: ResMut<ProjectManifestLoader>,
    asset_server: Res<AssetServer>,
    config: Res<SiteConfig>,
) {
    if loader.handle.is_some() {
        return;
    }
    info!("Loading projects from {}", config.data_path);
    loader.handle = Some(asset_server.load(config.data_path.clone()));
}

/// Settle the catalog once the manifest is available or has failed.
///
/// Failure never propagates: the catalog stays empty and one notification is
/// raised.
pub fn poll_project_manifest(
    loader: Res<ProjectManifestLoader>,
    manifests: Res<Assets<ProjectManifest>>,
    asset_server: Res<AssetServer>,
    config: Res<SiteConfig>,
    mut catalog: ResMut<ProjectCatalog>,
    mut notifications: EventWriter<Notification>,
    mut next_state: ResMut<NextState<SiteState>>,
) {
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    if let Some(manifest) = manifests.get(handle) {
        info!("✓ Loaded {} projects", manifest.project_list.len());
        *catalog = ProjectCatalog::new(manifest.project_list.clone());
        next_state.set(SiteState::Ready);
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
        let error = SiteError::CatalogLoad {
            path: config.data_path.clone(),
            reason: err.to_string(),
        };
        error!("{}", error);
        *catalog = ProjectCatalog::default();
        notifications.write(Notification::error(LOAD_FAILURE_MESSAGE));
        next_state.set(SiteState::Ready);
    }
}
