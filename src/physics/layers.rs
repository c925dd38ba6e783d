//! Collision layers used to classify interactables and put-back markers.
use std::fmt;

use avian3d::prelude::{CollisionLayers, LayerMask, PhysicsLayer};

/// Physics classification of every collider in the scene.
#[derive(PhysicsLayer, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameLayer {
    #[default]
    Default,
    Interactable,
    PutBackObjects,
    Player,
}

impl GameLayer {
    pub const ALL: [GameLayer; 4] = [
        GameLayer::Default,
        GameLayer::Interactable,
        GameLayer::PutBackObjects,
        GameLayer::Player,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Interactable => "Interactable",
            Self::PutBackObjects => "PutBackObjects",
            Self::Player => "Player",
        }
    }

    /// Looks a layer up by the name used in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|layer| layer.name() == name)
    }

    /// Membership in this layer only, colliding with everything.
    pub fn membership(self) -> CollisionLayers {
        CollisionLayers::new(self, LayerMask::ALL)
    }
}

impl fmt::Display for GameLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Layers the reticle ray may hit. Put-back markers are only eligible while
/// the player is holding something.
pub fn reticle_mask(holding: bool) -> LayerMask {
    if holding {
        LayerMask::from([GameLayer::Interactable, GameLayer::PutBackObjects])
    } else {
        LayerMask::from(GameLayer::Interactable)
    }
}
