use bevy::prelude::*;

mod interaction;
mod physics;
mod player;
mod put_back;
mod ui;
mod world;

use crate::{
    interaction::InteractionPlugin, physics::PhysicsPlugin, player::PlayerPlugin,
    put_back::PutBackPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            PhysicsPlugin, // Before the plugins whose systems cast rays or add colliders
            InteractionPlugin,
            PutBackPlugin,
            PlayerPlugin,
            UiPlugin,
            WorldPlugin,
        ))
        .run();
}
