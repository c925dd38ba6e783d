//! Systems for player interaction with interactables and put-back markers.
use avian3d::prelude::{Collider, SpatialQuery, SpatialQueryFilter};
use bevy::log::{debug, info};
use bevy::prelude::*;

use crate::{
    interaction::{
        components::{Interactable, InteractionType},
        config::InteractionSettings,
        events::{HighlightRequest, InteractRequest, SkipSecondaryAudio},
    },
    physics::layers::reticle_mask,
    player::components::{Held, HeldObject, InteractionTarget, Player, PlayerInteractionState},
    put_back::components::{PickupObjectId, PutBackMarker},
};

/// The entity under the reticle together with its reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub target: InteractionTarget,
    pub distance: f32,
    pub reach: f32,
}

impl TargetCandidate {
    pub fn in_reach(&self) -> bool {
        self.distance <= self.reach
    }
}

/// Classifies a ray hit. Interactables take precedence over markers sharing
/// the same entity.
pub fn candidate_for_hit(
    entity: Entity,
    distance: f32,
    interactable: Option<&Interactable>,
    marker: Option<&PutBackMarker>,
) -> Option<TargetCandidate> {
    if let Some(interactable) = interactable {
        return Some(TargetCandidate {
            target: InteractionTarget::Interactable(entity),
            distance,
            reach: interactable.interaction_distance(),
        });
    }
    marker.map(|marker| TargetCandidate {
        target: InteractionTarget::PutBack(entity),
        distance,
        reach: marker.interaction_distance(),
    })
}

/// Ray filter for the reticle. While holding, the held object, objects that
/// refuse interaction while holding, and markers belonging to other objects
/// are skipped so the ray reaches whatever lies behind them.
pub fn reticle_filter<'a>(
    held: Option<HeldObject>,
    interactables: impl IntoIterator<Item = (Entity, &'a Interactable)>,
    markers: impl IntoIterator<Item = (Entity, &'a PutBackMarker)>,
) -> SpatialQueryFilter {
    let filter = SpatialQueryFilter::from_mask(reticle_mask(held.is_some()));
    let Some(held) = held else {
        return filter;
    };

    let blocked = interactables
        .into_iter()
        .filter(|(_, interactable)| !interactable.interactions_allowed_when_holding_object())
        .map(|(entity, _)| entity);
    let foreign_markers = markers
        .into_iter()
        .filter(|(_, marker)| !marker.accepts(held.id))
        .map(|(entity, _)| entity);

    filter.with_excluded_entities(
        std::iter::once(held.entity).chain(blocked).chain(foreign_markers),
    )
}

/// Stores the new target and moves the highlight onto it.
pub fn retarget(
    state: &mut PlayerInteractionState,
    target: Option<InteractionTarget>,
    highlights: &mut MessageWriter<HighlightRequest>,
) {
    if target == state.target {
        return;
    }

    if let Some(previous) = state.target.and_then(|target| target.interactable()) {
        highlights.write(HighlightRequest::unhighlight(previous));
    }
    if let Some(next) = target.and_then(|target| target.interactable()) {
        highlights.write(HighlightRequest::highlight(next));
    }
    state.target = target;
}

/// Casts the reticle ray and moves the highlight to the new target.
pub fn update_interaction_target(
    spatial: SpatialQuery,
    player: Query<&GlobalTransform, With<Player>>,
    interactables: Query<(Entity, &Interactable)>,
    markers: Query<(Entity, &PutBackMarker)>,
    settings: Res<InteractionSettings>,
    mut state: ResMut<PlayerInteractionState>,
    mut highlights: MessageWriter<HighlightRequest>,
) {
    let target = player.single().ok().and_then(|camera| {
        let filter = reticle_filter(state.held, interactables.iter(), markers.iter());
        let hit = spatial.cast_ray(
            camera.translation(),
            camera.forward(),
            settings.targeting.max_reach,
            true,
            &filter,
        )?;
        candidate_for_hit(
            hit.entity,
            hit.distance,
            interactables.get(hit.entity).ok().map(|(_, interactable)| interactable),
            markers.get(hit.entity).ok().map(|(_, marker)| marker),
        )
        .filter(TargetCandidate::in_reach)
        .map(|candidate| candidate.target)
    });

    retarget(&mut state, target, &mut highlights);
}

/// Handles the interact key: interacts with the target, picks up pickup
/// objects, and puts held objects back at their marker.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn handle_interaction_input(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<PlayerInteractionState>,
    interactables: Query<(&Interactable, Option<&Collider>, Option<&Name>)>,
    objects: Query<&Transform, Without<PutBackMarker>>,
    markers: Query<(&PutBackMarker, &Transform)>,
    settings: Res<InteractionSettings>,
    mut interact: MessageWriter<InteractRequest>,
    mut highlights: MessageWriter<HighlightRequest>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }

    let Some(target) = state.target else {
        debug!("Player pressed E but nothing is targeted");
        return;
    };

    match target {
        InteractionTarget::Interactable(entity) => {
            let Ok((interactable, collider, name)) = interactables.get(entity) else {
                return;
            };
            interact.write(InteractRequest { entity });

            if interactable.interaction_type() != InteractionType::Pickup || state.is_holding() {
                return;
            }

            let id = PickupObjectId::from(entity);
            let has_marker = markers.iter().any(|(marker, _)| {
                marker.accepts(id) || marker.pickup_object() == Some(entity)
            });
            if !has_marker {
                if let Ok(transform) = objects.get(entity) {
                    let distance = if interactable.interaction_distance() > 0.0 {
                        interactable.interaction_distance()
                    } else {
                        settings.put_back.interaction_distance
                    };
                    let mut marker = commands.spawn((
                        PutBackMarker::for_object(entity, distance),
                        *transform,
                        Name::new(format!(
                            "Put Back: {}",
                            name.map(Name::as_str).unwrap_or("object")
                        )),
                    ));
                    if let Some(collider) = collider {
                        marker.insert(collider.clone());
                    }
                }
            }

            highlights.write(HighlightRequest::unhighlight(entity));
            commands.entity(entity).insert((Held, Visibility::Hidden));
            state.held = Some(HeldObject { entity, id });
            state.target = None;
            info!("Picked up {}", name.map(Name::as_str).unwrap_or("object"));
        }
        InteractionTarget::PutBack(marker_entity) => {
            let Some(held) = state.held else {
                return;
            };
            let Ok((marker, marker_transform)) = markers.get(marker_entity) else {
                return;
            };
            if !marker.accepts(held.id) {
                debug!("Put-back marker does not belong to {}", held.id);
                return;
            }

            let scale = objects
                .get(held.entity)
                .map(|transform| transform.scale)
                .unwrap_or(Vec3::ONE);
            commands
                .entity(held.entity)
                .insert((
                    Transform {
                        translation: marker_transform.translation,
                        rotation: marker_transform.rotation,
                        scale,
                    },
                    Visibility::Inherited,
                ))
                .remove::<Held>();
            state.held = None;
            state.target = None;
            info!("Put back {}", held.id);
        }
    }
}

/// Skips the captioned secondary sound on X.
pub fn handle_skip_audio_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut skips: MessageWriter<SkipSecondaryAudio>,
) {
    if keyboard.just_pressed(KeyCode::KeyX) {
        skips.write(SkipSecondaryAudio);
    }
}
