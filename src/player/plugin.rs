//! Player plugin wiring interaction systems.
use bevy::prelude::*;

use crate::{
    interaction::highlight::apply_highlight_requests,
    player::{
        components::PlayerInteractionState,
        systems::{handle_interaction_input, handle_skip_audio_input, update_interaction_target},
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInteractionState>().add_systems(
            Update,
            (
                update_interaction_target.before(apply_highlight_requests),
                handle_interaction_input
                    .after(update_interaction_target)
                    .before(apply_highlight_requests),
                handle_skip_audio_input,
            ),
        );
    }
}
