//! Startup checks and the base interaction flow.
use avian3d::prelude::Collider;
use bevy::prelude::*;

use crate::physics::layers::GameLayer;

use super::{
    audio::InteractionManager,
    components::{Interactable, SecondarySound, SecondarySoundOutcome},
    config::InteractionSettings,
    errors::{InteractionSetupError, InteractionWarning},
    events::{InteractRequest, InteractionPerformed},
    highlight::{object_label, DefaultHighlightMaterial},
};

/// Builds the default highlight template unless one was injected. Without
/// material storage the error is logged and highlighting stays disabled.
pub fn setup_default_highlight_material(
    mut commands: Commands,
    settings: Res<InteractionSettings>,
    existing: Res<DefaultHighlightMaterial>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    if existing.handle().is_some() {
        return;
    }
    let Some(mut materials) = materials else {
        error!("{}", InteractionSetupError::MissingHighlightMaterial);
        return;
    };

    let handle = materials.add(settings.highlight_template());
    commands.insert_resource(DefaultHighlightMaterial::new(handle));
    info!("Default highlight material created");
}

pub fn verify_interaction_manager(manager: Option<Res<InteractionManager>>) {
    match manager {
        Some(manager) => info!(
            "Interaction manager ready (audio backend: {})",
            manager.label()
        ),
        None => error!("{}", InteractionSetupError::MissingInteractionManager),
    }
}

/// Moves interactable colliders onto the interactable layer so the reticle
/// ray can find them.
#[allow(clippy::type_complexity)]
pub fn assign_interactable_layers(
    mut commands: Commands,
    added: Query<
        Entity,
        (
            With<Interactable>,
            With<Collider>,
            Or<(Added<Interactable>, Added<Collider>)>,
        ),
    >,
) {
    for entity in added.iter() {
        commands
            .entity(entity)
            .insert(GameLayer::Interactable.membership());
    }
}

/// Runs the base interaction for each request: plays the secondary sound when
/// its policy allows, then announces the interaction.
pub fn handle_interact_requests(
    mut requests: MessageReader<InteractRequest>,
    mut interactables: Query<(&Interactable, Option<&mut SecondarySound>, Option<&Name>)>,
    mut manager: Option<ResMut<InteractionManager>>,
    mut performed: MessageWriter<InteractionPerformed>,
) {
    for request in requests.read() {
        let Ok((interactable, sound, name)) = interactables.get_mut(request.entity) else {
            debug!(
                "Interact request for {:?} ignored: not an interactable",
                request.entity
            );
            continue;
        };

        // Without a manager the sound is left untouched so a play-once clip
        // can still play after one is installed.
        match (sound, manager.as_deref_mut()) {
            (Some(mut sound), Some(manager)) => match sound.on_interact() {
                SecondarySoundOutcome::Play(playback) => {
                    manager.play_secondary_interaction_audio(&playback)
                }
                SecondarySoundOutcome::MissingClip => warn!(
                    "{}",
                    InteractionWarning::MissingSecondaryClip {
                        object: object_label(request.entity, name),
                    }
                ),
                SecondarySoundOutcome::Disabled | SecondarySoundOutcome::AlreadyPlayed => {}
            },
            (Some(_), None) => debug!(
                "Secondary sound for '{}' skipped: no interaction manager",
                object_label(request.entity, name)
            ),
            (None, _) => {}
        }

        performed.write(InteractionPerformed {
            entity: request.entity,
            interaction_type: interactable.interaction_type(),
        });
    }
}
