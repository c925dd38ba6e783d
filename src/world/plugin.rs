//! WorldPlugin spawns the demo scene and drives the first-person camera.
use bevy::prelude::*;

use crate::world::systems::{
    explorer_camera_look, explorer_camera_walk, spawn_world_environment, update_cursor_grab,
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_world_environment).add_systems(
            Update,
            (
                update_cursor_grab,
                explorer_camera_look.after(update_cursor_grab),
                explorer_camera_walk,
            ),
        );
    }
}
