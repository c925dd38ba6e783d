//! Interaction manager: the injected service that plays secondary sounds.
use bevy::prelude::*;

use super::{components::SecondaryAudioRequest, events::SkipSecondaryAudio};

/// Audio backend the interaction manager forwards secondary sounds to.
pub trait InteractionAudio: Send + Sync + 'static {
    fn play_secondary_interaction_audio(
        &mut self,
        clip: Handle<AudioSource>,
        show_caption: bool,
        caption: &str,
    );

    /// Requests that still need an audio entity spawned by the engine.
    fn take_pending(&mut self) -> Vec<SecondaryAudioRequest> {
        Vec::new()
    }

    fn label(&self) -> &'static str;
}

/// Default backend: buffers requests until `play_queued_secondary_audio` runs.
#[derive(Debug, Default)]
pub struct QueuedInteractionAudio {
    pending: Vec<SecondaryAudioRequest>,
}

impl InteractionAudio for QueuedInteractionAudio {
    fn play_secondary_interaction_audio(
        &mut self,
        clip: Handle<AudioSource>,
        show_caption: bool,
        caption: &str,
    ) {
        self.pending.push(SecondaryAudioRequest {
            clip,
            show_caption,
            caption: caption.to_string(),
        });
    }

    fn take_pending(&mut self) -> Vec<SecondaryAudioRequest> {
        std::mem::take(&mut self.pending)
    }

    fn label(&self) -> &'static str {
        "queued"
    }
}

/// Resource wrapping the active [`InteractionAudio`] backend.
#[derive(Resource)]
pub struct InteractionManager {
    audio: Box<dyn InteractionAudio>,
}

impl InteractionManager {
    pub fn new(audio: Box<dyn InteractionAudio>) -> Self {
        Self { audio }
    }

    pub fn play_secondary_interaction_audio(&mut self, request: &SecondaryAudioRequest) {
        self.audio.play_secondary_interaction_audio(
            request.clip.clone(),
            request.show_caption,
            &request.caption,
        );
    }

    pub fn take_pending(&mut self) -> Vec<SecondaryAudioRequest> {
        self.audio.take_pending()
    }

    pub fn label(&self) -> &'static str {
        self.audio.label()
    }
}

impl Default for InteractionManager {
    fn default() -> Self {
        Self::new(Box::new(QueuedInteractionAudio::default()))
    }
}

/// Marks the audio entity of the secondary sound currently playing.
/// Captioned playback behaves like an audio log and can be skipped.
#[derive(Component, Debug, Clone)]
pub struct SecondaryAudioPlayback {
    pub caption: Option<String>,
}

impl SecondaryAudioPlayback {
    pub fn is_skippable(&self) -> bool {
        self.caption.is_some()
    }
}

/// Spawns an audio entity for the newest queued request, replacing whatever
/// secondary sound is still playing.
pub fn play_queued_secondary_audio(
    mut commands: Commands,
    manager: Option<ResMut<InteractionManager>>,
    active: Query<Entity, With<SecondaryAudioPlayback>>,
) {
    let Some(mut manager) = manager else {
        return;
    };
    let Some(request) = manager.take_pending().pop() else {
        return;
    };

    for entity in active.iter() {
        commands.entity(entity).despawn();
    }

    let caption = request.show_caption.then(|| request.caption.clone());
    debug!(
        "Playing secondary interaction audio (caption: {})",
        caption.as_deref().unwrap_or("none")
    );
    commands.spawn((
        AudioPlayer::new(request.clip),
        PlaybackSettings::DESPAWN,
        SecondaryAudioPlayback { caption },
        Name::new("Secondary Interaction Audio"),
    ));
}

/// Stops skippable secondary sounds when a skip is requested.
pub fn skip_secondary_audio(
    mut commands: Commands,
    mut skips: MessageReader<SkipSecondaryAudio>,
    active: Query<(Entity, &SecondaryAudioPlayback)>,
) {
    if skips.read().last().is_none() {
        return;
    }

    for (entity, playback) in active.iter() {
        if playback.is_skippable() {
            info!("Skipping secondary audio");
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(caption: &str) -> SecondaryAudioRequest {
        SecondaryAudioRequest {
            clip: Handle::default(),
            show_caption: !caption.is_empty(),
            caption: caption.to_string(),
        }
    }

    fn playback_count(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&SecondaryAudioPlayback>();
        query.iter(app.world()).count()
    }

    #[test]
    fn queued_backend_hands_requests_over_once() {
        let mut manager = InteractionManager::default();
        manager.play_secondary_interaction_audio(&request("Log 1"));
        assert_eq!(manager.take_pending(), vec![request("Log 1")]);
        assert!(manager.take_pending().is_empty());
    }

    #[test]
    fn newest_request_replaces_active_playback() {
        let mut app = App::new();
        app.insert_resource(InteractionManager::default())
            .add_systems(Update, play_queued_secondary_audio);

        app.world_mut()
            .resource_mut::<InteractionManager>()
            .play_secondary_interaction_audio(&request("first"));
        app.update();
        assert_eq!(playback_count(&mut app), 1);

        {
            let mut manager = app.world_mut().resource_mut::<InteractionManager>();
            manager.play_secondary_interaction_audio(&request("second"));
            manager.play_secondary_interaction_audio(&request("third"));
        }
        app.update();

        let mut query = app.world_mut().query::<&SecondaryAudioPlayback>();
        let captions: Vec<_> = query
            .iter(app.world())
            .map(|playback| playback.caption.clone())
            .collect();
        assert_eq!(captions, vec![Some("third".to_string())]);
    }

    #[test]
    fn skip_only_stops_captioned_playback() {
        let mut app = App::new();
        app.add_message::<SkipSecondaryAudio>()
            .add_systems(Update, skip_secondary_audio);

        app.world_mut().spawn(SecondaryAudioPlayback {
            caption: Some("Diary".to_string()),
        });
        app.world_mut()
            .spawn(SecondaryAudioPlayback { caption: None });

        app.update();
        assert_eq!(playback_count(&mut app), 2);

        app.world_mut().write_message(SkipSecondaryAudio);
        app.update();

        let mut query = app.world_mut().query::<&SecondaryAudioPlayback>();
        let remaining: Vec<_> = query.iter(app.world()).collect();
        assert_eq!(remaining.len(), 1);
        assert!(!remaining[0].is_skippable());
    }
}
