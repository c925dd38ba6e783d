//! Components used by the world module.
use bevy::prelude::*;

/// First-person camera orientation and movement tuning.
#[derive(Component)]
pub struct ExplorerCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub walk_speed: f32,
    pub look_sensitivity: f32,
    pub eye_height: f32,
}

impl ExplorerCamera {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            walk_speed: 3.5,
            look_sensitivity: 0.2,
            eye_height: 1.6,
        }
    }
}
