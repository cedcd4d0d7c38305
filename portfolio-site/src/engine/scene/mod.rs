//! Decorative WebGL scenes.
//!
//! A particle field always drifts behind the page. The about view adds an
//! interactive dodecahedron that exists only while that view is shown; the
//! view controller drives its lifecycle with [`AboutSceneCommand`]s.

use bevy::prelude::*;

use crate::engine::core::app_setup::SiteSet;

/// Particle background, scene camera and slow rotation.
pub mod background;

/// Dodecahedron mount/dispose lifecycle, pointer easing and charge.
pub mod about;

/// Vertex, edge and frame mesh generation for the dodecahedron.
pub mod dodecahedron;

/// Lifecycle requests for the about scene.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum AboutSceneCommand {
    /// Create the scene bound to the element matching `container`.
    Mount { container: String },
    /// Tear down the scene and release its GPU assets.
    Dispose,
}

/// Pointer input over the about container.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AboutPointerEvent {
    /// Position in normalised device coordinates.
    Move(Vec2),
    Press,
    Release,
}

pub struct DecorativeScenePlugin;

impl Plugin for DecorativeScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<about::AboutInteraction>()
            .add_systems(
                Startup,
                (background::spawn_scene_camera, background::spawn_background),
            )
            .add_systems(Update, background::rotate_background)
            .add_systems(
                Update,
                (
                    about::handle_about_commands,
                    about::apply_pointer_events,
                    about::animate_about_scene
                        .run_if(resource_exists::<about::AboutSceneInstance>),
                )
                    .chain()
                    .after(SiteSet::Views),
            );

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(
            Update,
            about::forward_window_pointer
                .run_if(resource_exists::<about::AboutSceneInstance>)
                .before(about::apply_pointer_events),
        );
    }
}
