//! PutBackPlugin initialises newly spawned markers.
use bevy::prelude::*;

use crate::{
    interaction::config::InteractionSettings, put_back::systems::initialize_put_back_markers,
};

pub struct PutBackPlugin;

impl Plugin for PutBackPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<InteractionSettings>() {
            app.insert_resource(InteractionSettings::load_or_default());
        }

        app.add_systems(PreUpdate, initialize_put_back_markers);
    }
}
