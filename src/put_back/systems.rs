//! Initialisation of newly spawned put-back markers.
use std::fmt;

use avian3d::prelude::{Collider, Sensor};
use bevy::prelude::*;

use crate::{
    interaction::config::InteractionSettings, physics::layers::GameLayer,
    put_back::components::PutBackMarker,
};

/// Edge length of the trigger cube given to markers spawned without a collider.
const DEFAULT_MARKER_SIZE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutBackSetupError {
    UnknownLayer { marker: String, layer: String },
}

impl fmt::Display for PutBackSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLayer { marker, layer } => write!(
                f,
                "Put-back marker '{}' cannot join physics layer '{}': layer is not defined",
                marker, layer
            ),
        }
    }
}

impl std::error::Error for PutBackSetupError {}

/// Turns each new marker's collider into a sensor, moves it onto the put-back
/// layer, and captures the configured pickup object's identity.
#[allow(clippy::type_complexity)]
pub fn initialize_put_back_markers(
    mut commands: Commands,
    mut markers: Query<
        (Entity, &mut PutBackMarker, Has<Collider>, Option<&Name>),
        Added<PutBackMarker>,
    >,
    settings: Res<InteractionSettings>,
) {
    for (entity, mut marker, has_collider, name) in markers.iter_mut() {
        let label = name
            .map(|name| name.as_str().to_string())
            .unwrap_or_else(|| format!("{:?}", entity));

        if !has_collider {
            warn!(
                "Put-back marker '{}' has no collider; adding a default trigger volume",
                label
            );
            commands.entity(entity).insert(Collider::cuboid(
                DEFAULT_MARKER_SIZE,
                DEFAULT_MARKER_SIZE,
                DEFAULT_MARKER_SIZE,
            ));
        }
        commands.entity(entity).insert(Sensor);

        match GameLayer::from_name(&settings.put_back.layer) {
            Some(layer) => {
                commands.entity(entity).insert(layer.membership());
            }
            None => error!(
                "{}",
                PutBackSetupError::UnknownLayer {
                    marker: label.clone(),
                    layer: settings.put_back.layer.clone(),
                }
            ),
        }

        if let Some(id) = marker.capture_pickup_identity() {
            debug!("Put-back marker '{}' bound to {}", label, id);
        }
    }
}
