//! Components describing interactable objects and their renderers.
use std::fmt;

use bevy::prelude::*;

/// Closed set of interaction categories the player loop dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionType {
    #[default]
    Static,
    Pickup,
    Activate,
    Journal,
    AudioDiary,
    Inventory,
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Static => "static",
            Self::Pickup => "pickup",
            Self::Activate => "activate",
            Self::Journal => "journal",
            Self::AudioDiary => "audio diary",
            Self::Inventory => "inventory",
        };
        write!(f, "{}", label)
    }
}

/// Core interaction metadata shared by every interactable object.
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    interaction_type: InteractionType,
    can_interact_while_holding: bool,
    interaction_distance: f32,
    interaction_string: String,
    discovered: bool,
}

impl Interactable {
    pub fn new(interaction_type: InteractionType, interaction_string: impl Into<String>) -> Self {
        Self {
            interaction_type,
            can_interact_while_holding: true,
            interaction_distance: 2.0,
            interaction_string: interaction_string.into(),
            discovered: false,
        }
    }

    pub fn with_distance(mut self, interaction_distance: f32) -> Self {
        self.interaction_distance = interaction_distance;
        self
    }

    /// Disallows interaction while the player is holding another object.
    pub fn blocked_while_holding(mut self) -> Self {
        self.can_interact_while_holding = false;
        self
    }

    pub fn interaction_type(&self) -> InteractionType {
        self.interaction_type
    }

    pub fn interactions_allowed_when_holding_object(&self) -> bool {
        self.can_interact_while_holding
    }

    pub fn interaction_distance(&self) -> f32 {
        self.interaction_distance
    }

    pub fn interaction_string(&self) -> &str {
        &self.interaction_string
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    /// Flags the object as discovered. Returns `true` only on the first call.
    pub(crate) fn mark_discovered(&mut self) -> bool {
        let newly = !self.discovered;
        self.discovered = true;
        newly
    }
}

/// Highlight slot appended to one renderer while the object is highlighted.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedHighlight {
    pub renderer: Entity,
    pub material: Handle<StandardMaterial>,
}

/// Highlight configuration and the record of slots currently applied.
#[derive(Component, Debug, Clone)]
pub struct Highlightable {
    pub enabled: bool,
    /// Replaces the default highlight template for this object only.
    pub material_override: Option<Handle<StandardMaterial>>,
    applied: Option<Vec<AppliedHighlight>>,
}

impl Highlightable {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn with_material(material: Handle<StandardMaterial>) -> Self {
        Self {
            material_override: Some(material),
            ..Default::default()
        }
    }

    pub fn is_applied(&self) -> bool {
        self.applied.is_some()
    }

    pub(crate) fn record_applied(&mut self, slots: Vec<AppliedHighlight>) {
        self.applied = Some(slots);
    }

    /// Clears the record, returning the slots that must be removed.
    pub(crate) fn take_applied(&mut self) -> Vec<AppliedHighlight> {
        self.applied.take().unwrap_or_default()
    }
}

impl Default for Highlightable {
    fn default() -> Self {
        Self {
            enabled: true,
            material_override: None,
            applied: None,
        }
    }
}

/// Ordered material list of a renderer. Slot 0 is the primary material; any
/// further slot is drawn as an overlay pass on the same mesh.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct MaterialSlots(Vec<Handle<StandardMaterial>>);

impl MaterialSlots {
    pub fn new(primary: Handle<StandardMaterial>) -> Self {
        Self(vec![primary])
    }

    pub fn from_handles(handles: Vec<Handle<StandardMaterial>>) -> Self {
        Self(handles)
    }

    pub fn primary(&self) -> Option<&Handle<StandardMaterial>> {
        self.0.first()
    }

    pub fn overlays(&self) -> &[Handle<StandardMaterial>] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn as_slice(&self) -> &[Handle<StandardMaterial>] {
        &self.0
    }

    #[cfg_attr(not(any(test, feature = "interaction_debug")), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a material as the last slot.
    pub fn push(&mut self, material: Handle<StandardMaterial>) {
        self.0.push(material);
    }

    /// Drops the last slot, returning it.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pop(&mut self) -> Option<Handle<StandardMaterial>> {
        self.0.pop()
    }

    /// Removes the last occurrence of `material`. Returns false when the slot
    /// list does not contain it.
    pub fn remove(&mut self, material: &Handle<StandardMaterial>) -> bool {
        match self.0.iter().rposition(|slot| slot == material) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Renderers marked static never get their bounds invalidated.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct StaticGeometry;

/// Overlay child spawned for a non-primary material slot.
#[derive(Component, Debug, Clone, Copy)]
pub struct MaterialOverlay {
    pub slot: usize,
}

/// Whether the secondary sound plays on the first interaction only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundPlayback {
    #[default]
    PlayOnce,
    PlayEveryTime,
}

/// Optional narration or effect played when the object is interacted with.
#[derive(Component, Debug, Clone)]
pub struct SecondarySound {
    pub enabled: bool,
    pub show_caption: bool,
    pub caption_text: String,
    pub playback: SoundPlayback,
    pub clip: Option<Handle<AudioSource>>,
    pub(super) has_played_once: bool,
}

/// Playback request forwarded to the interaction manager.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryAudioRequest {
    pub clip: Handle<AudioSource>,
    pub show_caption: bool,
    pub caption: String,
}

/// Result of evaluating a secondary sound for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum SecondarySoundOutcome {
    Disabled,
    AlreadyPlayed,
    MissingClip,
    Play(SecondaryAudioRequest),
}

impl SecondarySound {
    pub fn new(clip: Handle<AudioSource>, playback: SoundPlayback) -> Self {
        Self {
            enabled: true,
            show_caption: false,
            caption_text: String::new(),
            playback,
            clip: Some(clip),
            has_played_once: false,
        }
    }

    pub fn with_caption(mut self, caption_text: impl Into<String>) -> Self {
        self.show_caption = true;
        self.caption_text = caption_text.into();
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn has_played_once(&self) -> bool {
        self.has_played_once
    }

    /// Decides whether this interaction plays the clip and records the play.
    pub fn on_interact(&mut self) -> SecondarySoundOutcome {
        if !self.enabled {
            return SecondarySoundOutcome::Disabled;
        }
        let Some(clip) = self.clip.clone() else {
            return SecondarySoundOutcome::MissingClip;
        };
        if self.has_played_once && self.playback == SoundPlayback::PlayOnce {
            return SecondarySoundOutcome::AlreadyPlayed;
        }

        self.has_played_once = true;
        let caption = if self.show_caption {
            self.caption_text.clone()
        } else {
            String::new()
        };
        SecondarySoundOutcome::Play(SecondaryAudioRequest {
            clip,
            show_caption: self.show_caption,
            caption,
        })
    }
}

impl Default for SecondarySound {
    fn default() -> Self {
        Self {
            enabled: false,
            show_caption: false,
            caption_text: String::new(),
            playback: SoundPlayback::PlayOnce,
            clip: None,
            has_played_once: false,
        }
    }
}
