use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        use constants::dom::BACKGROUND_CANVAS;

        // The canvas sits behind the page; DOM events must reach the page.
        Window {
            canvas: Some(BACKGROUND_CANVAS.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Portfolio".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
