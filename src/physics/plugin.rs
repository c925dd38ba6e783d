//! PhysicsPlugin installs the avian3d backend used for colliders and ray casts.
use avian3d::prelude::PhysicsPlugins;
use bevy::prelude::*;

use crate::physics::layers::GameLayer;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        let layers: Vec<&str> = GameLayer::ALL.iter().map(|layer| layer.name()).collect();
        info!("Physics layers configured: {}", layers.join(", "));

        app.add_plugins(PhysicsPlugins::default());
    }
}
