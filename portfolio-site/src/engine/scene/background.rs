use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::view::NoFrustumCulling;
use bevy::window::PrimaryWindow;
use constants::render_settings::{
    CAMERA_POSITION, DESKTOP_PARTICLES, MOBILE_PARTICLES, PARTICLE_COLOUR, PARTICLE_ROTATION_SPEED,
    PARTICLE_SEED, ParticleSettings,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SiteConfig;

#[derive(Component)]
pub struct BackgroundParticles;

/// Density for the current viewport. Without a window (headless) the desktop
/// field is used.
pub fn particle_settings(
    viewport_width: Option<f32>,
    mobile_breakpoint_px: f32,
) -> &'static ParticleSettings {
    match viewport_width {
        Some(width) if width < mobile_breakpoint_px => &MOBILE_PARTICLES,
        _ => &DESKTOP_PARTICLES,
    }
}

/// Uniformly scattered points in a cube of side `spread` centred on the origin.
pub fn particle_positions(settings: &ParticleSettings, seed: u64) -> Vec<[f32; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = settings.spread / 2.0;
    (0..settings.count)
        .map(|_| {
            [
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ]
        })
        .collect()
}

fn particle_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh
}

pub fn spawn_scene_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub fn spawn_background(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<SiteConfig>,
) {
    let width = windows.single().ok().map(|window| window.width());
    let settings = particle_settings(width, config.mobile_breakpoint_px);
    debug!(
        "Background: {} particles, spread {}",
        settings.count, settings.spread
    );

    let material = materials.add(StandardMaterial {
        base_color: PARTICLE_COLOUR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(particle_mesh(particle_positions(settings, PARTICLE_SEED)))),
        MeshMaterial3d(material),
        NoFrustumCulling,
        Transform::IDENTITY,
        BackgroundParticles,
    ));
}

pub fn rotate_background(
    time: Res<Time>,
    mut particles: Query<&mut Transform, With<BackgroundParticles>>,
) {
    let (speed_x, speed_y) = PARTICLE_ROTATION_SPEED;
    let dt = time.delta_secs();
    for mut transform in &mut particles {
        transform.rotate_x(speed_x * dt);
        transform.rotate_y(speed_y * dt);
    }
}
