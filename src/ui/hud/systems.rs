// src/ui/hud/systems.rs
//
// Systems spawning the HUD and keeping its text in sync with the player's
// target and the secondary audio currently playing.

use bevy::prelude::*;

use crate::{
    interaction::{
        audio::SecondaryAudioPlayback, components::Interactable, config::InteractionSettings,
    },
    player::components::{InteractionTarget, PlayerInteractionState},
};

use super::components::{CaptionLabel, Reticle, ReticlePrompt};

// Visual constants
const RETICLE_SIZE_PX: f32 = 6.0;
const PROMPT_OFFSET_PX: f32 = 18.0;
const CAPTION_BOTTOM_PX: f32 = 48.0;
const TEXT_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
const RETICLE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);
const CAPTION_BACKGROUND: Color = Color::srgba(0.05, 0.05, 0.08, 0.8);

/// Text for the prompt under the reticle, if anything is targeted. Objects
/// without an interaction string fall back to the configured default.
pub fn prompt_text(
    target: Option<InteractionTarget>,
    interactables: &Query<&Interactable>,
    settings: &InteractionSettings,
) -> Option<String> {
    match target? {
        InteractionTarget::Interactable(entity) => {
            let interactable = interactables.get(entity).ok()?;
            let text = match interactable.interaction_string().trim() {
                "" => settings.interactable.interaction_string.as_str(),
                text => text,
            };
            Some(text.to_string())
        }
        InteractionTarget::PutBack(_) => Some(settings.put_back.prompt.clone()),
    }
}

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Name::new("HUD Root"),
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    width: Val::Px(RETICLE_SIZE_PX),
                    height: Val::Px(RETICLE_SIZE_PX),
                    ..default()
                },
                BackgroundColor(RETICLE_COLOR),
                Reticle,
            ));

            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Percent(50.0),
                    margin: UiRect::top(Val::Px(PROMPT_OFFSET_PX)),
                    ..default()
                },
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                Visibility::Hidden,
                ReticlePrompt,
            ));

            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(CAPTION_BOTTOM_PX),
                    max_width: Val::Percent(60.0),
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    ..default()
                },
                BackgroundColor(CAPTION_BACKGROUND),
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                Visibility::Hidden,
                CaptionLabel,
            ));
        });

    info!("HUD spawned");
}

pub fn update_reticle_prompt(
    state: Option<Res<PlayerInteractionState>>,
    settings: Res<InteractionSettings>,
    interactables: Query<&Interactable>,
    mut prompts: Query<(&mut Text, &mut Visibility), With<ReticlePrompt>>,
) {
    let target = state.and_then(|state| state.target);
    let text = prompt_text(target, &interactables, &settings);
    for (mut prompt, mut visibility) in prompts.iter_mut() {
        apply_label(&mut prompt, &mut visibility, text.as_deref());
    }
}

pub fn update_caption_label(
    playing: Query<&SecondaryAudioPlayback>,
    mut captions: Query<(&mut Text, &mut Visibility), With<CaptionLabel>>,
) {
    let caption = playing
        .iter()
        .find_map(|playback| playback.caption.as_deref());
    for (mut label, mut visibility) in captions.iter_mut() {
        apply_label(&mut label, &mut visibility, caption);
    }
}

fn apply_label(text: &mut Mut<Text>, visibility: &mut Mut<Visibility>, value: Option<&str>) {
    let wanted = match value {
        Some(_) => Visibility::Inherited,
        None => Visibility::Hidden,
    };
    visibility.set_if_neq(wanted);
    if let Some(value) = value {
        if text.0 != value {
            text.0 = value.to_string();
        }
    }
}
