use bevy::color::Color;
use bevy::math::Vec3;

pub struct ParticleSettings {
    pub count: usize,
    pub spread: f32,
}

pub const DESKTOP_PARTICLES: ParticleSettings = ParticleSettings {
    count: 5000,
    spread: 20.0,
};

/// Fewer particles packed closer together on small screens.
pub const MOBILE_PARTICLES: ParticleSettings = ParticleSettings {
    count: 1500,
    spread: 15.0,
};

pub const PARTICLE_COLOUR: Color = Color::srgba(0.533, 0.533, 0.533, 0.5);

/// Fixed seed so the starfield is identical across reloads.
pub const PARTICLE_SEED: u64 = 0x5EED_CAFE;

/// Background rotation in radians per second (x, y).
pub const PARTICLE_ROTATION_SPEED: (f32, f32) = (0.012, 0.03);

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Where the about dodecahedron sits relative to the camera target.
pub const DODECAHEDRON_POSITION: Vec3 = Vec3::new(1.6, 0.0, 0.0);
pub const DODECAHEDRON_SCALE: f32 = 0.9;

/// Pointer offset (in normalised device units) to target rotation in radians.
pub const POINTER_ROTATION_FACTOR: f32 = 0.5;

/// Per-frame easing factor towards the pointer target at 60 fps.
pub const ROTATION_EASING: f32 = 0.05;

/// Constant roll in radians per second.
pub const DODECAHEDRON_ROLL_SPEED: f32 = 0.12;

/// Charge gained per second while the pointer is held down.
pub const CHARGE_RATE: f32 = 0.6;

/// Charge lost per second once released.
pub const CHARGE_DECAY: f32 = 0.9;

/// Emissive multiplier at full charge.
pub const MAX_EMISSIVE: f32 = 8.0;

/// Point light intensity at full charge.
pub const MAX_LIGHT_INTENSITY: f32 = 400_000.0;
