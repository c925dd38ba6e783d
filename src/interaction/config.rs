use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/interaction.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    interactable: RawInteractable,
    #[serde(default)]
    highlight: RawHighlight,
    #[serde(default)]
    put_back: RawPutBack,
    #[serde(default)]
    targeting: RawTargeting,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInteractable {
    interaction_distance: f32,
    interaction_string: String,
    caption_text: String,
}

impl Default for RawInteractable {
    fn default() -> Self {
        Self {
            interaction_distance: 2.0,
            interaction_string: "Interact".to_string(),
            caption_text: "Audio log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHighlight {
    color: [f32; 4],
    emissive_strength: f32,
}

impl Default for RawHighlight {
    fn default() -> Self {
        Self {
            color: [1.0, 0.85, 0.35, 0.35],
            emissive_strength: 0.4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPutBack {
    layer: String,
    interaction_distance: f32,
    prompt: String,
}

impl Default for RawPutBack {
    fn default() -> Self {
        Self {
            layer: "PutBackObjects".to_string(),
            interaction_distance: 2.0,
            prompt: "Put back".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTargeting {
    max_reach: f32,
}

impl Default for RawTargeting {
    fn default() -> Self {
        Self { max_reach: 6.0 }
    }
}

/// Runtime configuration derived from `config/interaction.toml`.
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub interactable: InteractableDefaults,
    pub highlight: HighlightSettings,
    pub put_back: PutBackSettings,
    pub targeting: TargetingSettings,
}

#[derive(Debug, Clone)]
pub struct InteractableDefaults {
    pub interaction_distance: f32,
    pub interaction_string: String,
    pub caption_text: String,
}

#[derive(Debug, Clone)]
pub struct HighlightSettings {
    pub color: Color,
    pub emissive_strength: f32,
}

#[derive(Debug, Clone)]
pub struct PutBackSettings {
    pub layer: String,
    pub interaction_distance: f32,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct TargetingSettings {
    pub max_reach: f32,
}

impl InteractionSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawInteractionConfig>(&raw) {
                Ok(parsed) => parsed.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawInteractionConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }
        }
    }

    /// Template the per-object highlight materials are cloned from.
    pub fn highlight_template(&self) -> StandardMaterial {
        let emissive = self.highlight.color.to_linear() * self.highlight.emissive_strength;
        StandardMaterial {
            base_color: self.highlight.color,
            emissive,
            alpha_mode: AlphaMode::Add,
            unlit: true,
            depth_bias: 1.0,
            ..default()
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

impl From<RawInteractionConfig> for InteractionSettings {
    fn from(value: RawInteractionConfig) -> Self {
        let interactable = InteractableDefaults {
            interaction_distance: value.interactable.interaction_distance.max(0.0),
            interaction_string: value.interactable.interaction_string,
            caption_text: value.interactable.caption_text,
        };

        let [r, g, b, a] = value.highlight.color.map(|channel| channel.clamp(0.0, 1.0));
        let highlight = HighlightSettings {
            color: Color::srgba(r, g, b, a),
            emissive_strength: value.highlight.emissive_strength.max(0.0),
        };

        let layer = value.put_back.layer.trim();
        let put_back = PutBackSettings {
            layer: if layer.is_empty() {
                RawPutBack::default().layer
            } else {
                layer.to_string()
            },
            interaction_distance: value.put_back.interaction_distance.max(0.0),
            prompt: value.put_back.prompt,
        };

        let targeting = TargetingSettings {
            max_reach: value.targeting.max_reach.max(0.1),
        };

        Self {
            interactable,
            highlight,
            put_back,
            targeting,
        }
    }
}
