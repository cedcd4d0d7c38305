//! Interactive dodecahedron shown while the about view is active.
//!
//! The scene is mounted and disposed through [`AboutSceneCommand`]s raised by
//! the view controller. Pointer input arrives as [`AboutPointerEvent`]s: from
//! container listeners on the web, from the primary window natively.

use bevy::prelude::*;
use constants::render_settings::{
    CHARGE_DECAY, CHARGE_RATE, DODECAHEDRON_POSITION, DODECAHEDRON_ROLL_SPEED,
    DODECAHEDRON_SCALE, MAX_EMISSIVE, MAX_LIGHT_INTENSITY, POINTER_ROTATION_FACTOR,
    ROTATION_EASING,
};

use super::dodecahedron::edge_frame_mesh;
use super::{AboutPointerEvent, AboutSceneCommand};

const FRAME_RADIUS: f32 = 2.0;
const FRAME_THICKNESS: f32 = 1.05;

/// Marks every entity owned by the mounted about scene.
#[derive(Component)]
pub struct AboutSceneEntity;

#[derive(Component)]
pub struct Dodecahedron;

#[derive(Component)]
pub struct ChargeLight;

/// Present while the scene is mounted.
#[derive(Resource, Debug)]
pub struct AboutSceneInstance {
    pub container: String,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

/// Pointer-driven rotation and the press-and-hold charge.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct AboutInteraction {
    pub target_rotation: Vec2,
    pub rotation: Vec3,
    pub pressed: bool,
    /// 0 at rest, 1 fully charged.
    pub charge: f32,
}

impl AboutInteraction {
    /// Aim at a pointer position in normalised device coordinates
    /// (x right, y up, both in -1..=1).
    pub fn point_at(&mut self, ndc: Vec2) {
        self.target_rotation = Vec2::new(
            -ndc.y * POINTER_ROTATION_FACTOR,
            ndc.x * POINTER_ROTATION_FACTOR,
        );
    }

    /// Advance by `dt` seconds and return the new rotation.
    pub fn step(&mut self, dt: f32) -> Vec3 {
        if self.pressed {
            self.charge = (self.charge + CHARGE_RATE * dt).min(1.0);
        } else {
            self.charge = (self.charge - CHARGE_DECAY * dt).max(0.0);
        }

        // Frame-rate independent form of a per-frame lerp at 60 fps.
        let ease = 1.0 - (1.0 - ROTATION_EASING).powf(dt * 60.0);
        self.rotation.x += (self.target_rotation.x - self.rotation.x) * ease;
        self.rotation.y += (self.target_rotation.y - self.rotation.y) * ease;
        self.rotation.z += DODECAHEDRON_ROLL_SPEED * dt;
        self.rotation
    }
}

/// Apply the last mount/dispose command of the frame.
///
/// Commands within a frame collapse to the final intent: mounting the same
/// container twice is a no-op, mounting a different one remounts.
pub fn handle_about_commands(
    mut commands: Commands,
    mut requests: EventReader<AboutSceneCommand>,
    instance: Option<Res<AboutSceneInstance>>,
    entities: Query<Entity, With<AboutSceneEntity>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut interaction: ResMut<AboutInteraction>,
) {
    let Some(latest) = requests.read().last().cloned() else {
        return;
    };

    let mounted_in = instance.as_ref().map(|i| i.container.as_str());
    if let AboutSceneCommand::Mount { container } = &latest {
        if mounted_in == Some(container.as_str()) {
            return;
        }
    }

    if let Some(instance) = instance.as_ref() {
        for entity in &entities {
            commands.entity(entity).despawn();
        }
        meshes.remove(&instance.mesh);
        materials.remove(&instance.material);
        commands.remove_resource::<AboutSceneInstance>();
        info!("About scene disposed from {}", instance.container);
    }

    if let AboutSceneCommand::Mount { container } = latest {
        *interaction = AboutInteraction::default();
        let instance = spawn_about_scene(&mut commands, &mut meshes, &mut materials, container);
        info!("About scene mounted in {}", instance.container);
        commands.insert_resource(instance);
    }
}

fn spawn_about_scene(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    container: String,
) -> AboutSceneInstance {
    let mesh = meshes.add(edge_frame_mesh(FRAME_RADIUS, FRAME_THICKNESS));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::BLACK,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(material.clone()),
        Transform::from_translation(DODECAHEDRON_POSITION)
            .with_scale(Vec3::splat(DODECAHEDRON_SCALE)),
        Dodecahedron,
        AboutSceneEntity,
    ));

    commands.spawn((
        PointLight {
            intensity: 0.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(DODECAHEDRON_POSITION + Vec3::Z * 2.0),
        ChargeLight,
        AboutSceneEntity,
    ));

    AboutSceneInstance {
        container,
        mesh,
        material,
    }
}

pub fn apply_pointer_events(
    mut pointer: EventReader<AboutPointerEvent>,
    mut interaction: ResMut<AboutInteraction>,
) {
    for event in pointer.read() {
        match event {
            AboutPointerEvent::Move(ndc) => interaction.point_at(*ndc),
            AboutPointerEvent::Press => interaction.pressed = true,
            AboutPointerEvent::Release => interaction.pressed = false,
        }
    }
}

pub fn animate_about_scene(
    time: Res<Time>,
    instance: Res<AboutSceneInstance>,
    mut interaction: ResMut<AboutInteraction>,
    mut dodecahedra: Query<&mut Transform, With<Dodecahedron>>,
    mut lights: Query<&mut PointLight, With<ChargeLight>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let rotation = interaction.step(time.delta_secs());
    let charge = interaction.charge;

    for mut transform in &mut dodecahedra {
        transform.rotation = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    }
    for mut light in &mut lights {
        light.intensity = charge * MAX_LIGHT_INTENSITY;
    }
    if let Some(material) = materials.get_mut(&instance.material) {
        material.emissive = LinearRgba::WHITE * (charge * MAX_EMISSIVE);
    }
}

/// Native stand-in for the web container listeners: the whole window acts as
/// the about container.
#[cfg(not(target_arch = "wasm32"))]
pub fn forward_window_pointer(
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut pointer: EventWriter<AboutPointerEvent>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(position) = window.cursor_position() {
        let size = window.size();
        if size.x > 0.0 && size.y > 0.0 {
            pointer.write(AboutPointerEvent::Move(Vec2::new(
                position.x / size.x * 2.0 - 1.0,
                1.0 - position.y / size.y * 2.0,
            )));
        }
    }
    if buttons.just_pressed(MouseButton::Left) {
        pointer.write(AboutPointerEvent::Press);
    }
    if buttons.just_released(MouseButton::Left) {
        pointer.write(AboutPointerEvent::Release);
    }
}
