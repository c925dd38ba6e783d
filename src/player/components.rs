//! Components and resources for the player interaction loop.
use bevy::prelude::*;

use crate::put_back::components::PickupObjectId;

/// Marker component identifying the player entity (attached to camera).
#[derive(Component, Debug)]
pub struct Player;

/// Marker for the pickup object the player is currently carrying.
#[derive(Component, Debug)]
pub struct Held;

/// What the reticle is currently resting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    Interactable(Entity),
    PutBack(Entity),
}

impl InteractionTarget {
    pub fn interactable(&self) -> Option<Entity> {
        match self {
            Self::Interactable(entity) => Some(*entity),
            Self::PutBack(_) => None,
        }
    }
}

/// Pickup object carried by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldObject {
    pub entity: Entity,
    pub id: PickupObjectId,
}

/// Resource tracking player interaction state.
#[derive(Resource, Default, Debug)]
pub struct PlayerInteractionState {
    /// Object or marker under the reticle and within reach.
    pub target: Option<InteractionTarget>,
    /// Object currently carried, if any.
    pub held: Option<HeldObject>,
}

impl PlayerInteractionState {
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }
}
