//! Put-back marker component and pickup identities.
use std::fmt;

use bevy::prelude::*;

/// Opaque identity of a pickup object. Holding one does not keep the object
/// alive and nothing checks that it still refers to a live entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickupObjectId(u64);

impl PickupObjectId {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl From<Entity> for PickupObjectId {
    fn from(entity: Entity) -> Self {
        Self(entity.to_bits())
    }
}

impl fmt::Display for PickupObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PICKUP-{:x}", self.0)
    }
}

/// Trigger zone marking where a pickup object can be dropped back.
#[derive(Component, Debug, Clone)]
pub struct PutBackMarker {
    pickup_object: Option<Entity>,
    pickup_object_id: Option<PickupObjectId>,
    interaction_distance: f32,
}

impl PutBackMarker {
    /// Marker tied to `pickup_object`; its identity is captured when the
    /// marker is initialised.
    pub fn for_object(pickup_object: Entity, interaction_distance: f32) -> Self {
        Self {
            pickup_object: Some(pickup_object),
            pickup_object_id: None,
            interaction_distance,
        }
    }

    /// Marker with no configured object; assign one with
    /// [`set_pickup_object_id`](Self::set_pickup_object_id).
    pub fn unassigned(interaction_distance: f32) -> Self {
        Self {
            pickup_object: None,
            pickup_object_id: None,
            interaction_distance,
        }
    }

    pub fn pickup_object(&self) -> Option<Entity> {
        self.pickup_object
    }

    pub fn pickup_object_id(&self) -> Option<PickupObjectId> {
        self.pickup_object_id
    }

    pub fn set_pickup_object_id(&mut self, id: PickupObjectId) {
        self.pickup_object_id = Some(id);
    }

    pub fn interaction_distance(&self) -> f32 {
        self.interaction_distance
    }

    pub fn set_interaction_distance(&mut self, distance: f32) {
        self.interaction_distance = distance;
    }

    /// True when this marker records `id` as its pickup object.
    pub fn accepts(&self, id: PickupObjectId) -> bool {
        self.pickup_object_id == Some(id)
    }

    /// Copies the configured object's identity unless an id was already set.
    pub(crate) fn capture_pickup_identity(&mut self) -> Option<PickupObjectId> {
        if self.pickup_object_id.is_none() {
            self.pickup_object_id = self.pickup_object.map(PickupObjectId::from);
        }
        self.pickup_object_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setter_overrides_captured_identity() {
        let mut world = World::new();
        let object = world.spawn_empty().id();
        let mut marker = PutBackMarker::for_object(object, 2.0);
        assert_eq!(marker.pickup_object_id(), None);

        assert_eq!(
            marker.capture_pickup_identity(),
            Some(PickupObjectId::from(object))
        );
        assert!(marker.accepts(PickupObjectId::from(object)));

        marker.set_pickup_object_id(PickupObjectId::new(7));
        assert_eq!(marker.pickup_object_id(), Some(PickupObjectId::new(7)));
        assert!(!marker.accepts(PickupObjectId::from(object)));

        assert_eq!(marker.capture_pickup_identity(), Some(PickupObjectId::new(7)));
    }

    #[test]
    fn distance_is_stored_without_validation() {
        let mut marker = PutBackMarker::unassigned(2.0);
        marker.set_interaction_distance(-1.0);
        assert_eq!(marker.interaction_distance(), -1.0);
        assert_eq!(marker.capture_pickup_identity(), None);
    }
}
