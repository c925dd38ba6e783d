//! InteractionPlugin wires highlight, discovery, and interaction systems.
//!
//! Dependencies are injected as resources: insert an [`InteractionManager`],
//! a [`DefaultHighlightMaterial`], or [`InteractionSettings`] before adding the
//! plugin to replace the defaults.
use bevy::prelude::*;

use super::{
    audio::{play_queued_secondary_audio, skip_secondary_audio, InteractionManager},
    config::InteractionSettings,
    events::{
        HighlightRequest, InteractRequest, InteractionPerformed, ObjectDiscovered,
        SkipSecondaryAudio,
    },
    highlight::{apply_highlight_requests, sync_material_overlays, DefaultHighlightMaterial},
    systems::{
        assign_interactable_layers, handle_interact_requests, setup_default_highlight_material,
        verify_interaction_manager,
    },
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<InteractionSettings>() {
            let settings = InteractionSettings::load_or_default();
            info!(
                "Interaction configured: default distance {:.2}, put-back layer '{}'",
                settings.interactable.interaction_distance, settings.put_back.layer
            );
            app.insert_resource(settings);
        }

        app.init_resource::<InteractionManager>()
            .init_resource::<DefaultHighlightMaterial>()
            .add_message::<HighlightRequest>()
            .add_message::<InteractRequest>()
            .add_message::<InteractionPerformed>()
            .add_message::<ObjectDiscovered>()
            .add_message::<SkipSecondaryAudio>()
            .add_systems(
                Startup,
                (setup_default_highlight_material, verify_interaction_manager),
            )
            .add_systems(PreUpdate, assign_interactable_layers)
            .add_systems(
                Update,
                (
                    apply_highlight_requests,
                    sync_material_overlays.after(apply_highlight_requests),
                    handle_interact_requests,
                    play_queued_secondary_audio.after(handle_interact_requests),
                    skip_secondary_audio,
                ),
            );
    }
}
