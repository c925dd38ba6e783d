//! Messages exchanged between the player loop and interactable systems.
use bevy::prelude::{Entity, Message};

use super::components::InteractionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightAction {
    Highlight,
    Unhighlight,
}

/// Asks the highlight system to (un)highlight an interactable.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRequest {
    pub entity: Entity,
    pub action: HighlightAction,
}

impl HighlightRequest {
    pub fn highlight(entity: Entity) -> Self {
        Self {
            entity,
            action: HighlightAction::Highlight,
        }
    }

    pub fn unhighlight(entity: Entity) -> Self {
        Self {
            entity,
            action: HighlightAction::Unhighlight,
        }
    }
}

/// Asks the interaction system to run the base interaction for an entity.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractRequest {
    pub entity: Entity,
}

/// Fired after the base interaction ran, for type-specific gameplay.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionPerformed {
    pub entity: Entity,
    pub interaction_type: InteractionType,
}

/// Fired the first time an interactable is highlighted.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectDiscovered {
    pub entity: Entity,
    pub interaction_type: InteractionType,
}

/// Stops the current captioned secondary sound.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct SkipSecondaryAudio;
