// src/ui/hud/plugin.rs
//
// Plugin registration for the HUD.

use bevy::prelude::*;

use crate::player::systems::{handle_interaction_input, update_interaction_target};

use super::systems::{spawn_hud, update_caption_label, update_reticle_prompt};

/// Plugin for the exploration HUD.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (
                update_reticle_prompt
                    .after(update_interaction_target)
                    .after(handle_interaction_input),
                update_caption_label,
            ),
        );
    }
}
