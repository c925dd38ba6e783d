//! Systems for the world module.
use avian3d::prelude::Collider;
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::{Cuboid, Cylinder, Plane3d},
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    interaction::{
        components::{
            Highlightable, Interactable, InteractionType, MaterialSlots, SecondarySound,
            SoundPlayback, StaticGeometry,
        },
        config::InteractionSettings,
        discovery::OnDiscover,
    },
    player::components::Player,
    put_back::components::PutBackMarker,
    world::components::ExplorerCamera,
};

const GROUND_SCALE: f32 = 40.0;
const CAMERA_START_POS: Vec3 = Vec3::new(0.0, 1.6, 4.0);
const MAX_PITCH: f32 = 1.54;

/// Spawns the demo scene: ground, sun, the player camera, and one
/// interactable of each kind.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    settings: Res<InteractionSettings>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(96, 104, 92),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Sun"),
    ));

    let mut camera_transform = Transform::from_translation(CAMERA_START_POS);
    camera_transform.look_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
    let (yaw, pitch) = yaw_pitch_from_transform(&camera_transform);
    commands.spawn((
        Camera3d::default(),
        camera_transform,
        ExplorerCamera::new(yaw, pitch),
        Player,
        Name::new("Player Camera"),
    ));

    let distance = settings.interactable.interaction_distance;
    let mut colored = |color: Color| {
        materials.add(StandardMaterial {
            base_color: color,
            ..default()
        })
    };
    let table_material = colored(Color::srgb_u8(120, 84, 56));
    let mug_material = colored(Color::srgb_u8(210, 210, 220));
    let journal_material = colored(Color::srgb_u8(140, 40, 36));
    let lever_material = colored(Color::srgb_u8(70, 70, 80));
    let diary_material = colored(Color::srgb_u8(40, 60, 110));
    let key_material = colored(Color::srgb_u8(200, 170, 60));

    let table_mesh = meshes.add(Cuboid::new(2.0, 0.8, 1.0));
    let small_box = meshes.add(Cuboid::new(0.3, 0.3, 0.3));
    let book_mesh = meshes.add(Cuboid::new(0.3, 0.05, 0.4));
    let lever_mesh = meshes.add(Cylinder::new(0.05, 0.6));
    let lever_highlight = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 0.3, 0.2, 0.45),
        ..settings.highlight_template()
    });

    commands.spawn((
        Mesh3d(table_mesh),
        MaterialSlots::new(table_material),
        Transform::from_xyz(0.0, 0.4, 0.0),
        Interactable::new(InteractionType::Static, "A sturdy oak table").with_distance(distance),
        Highlightable::disabled(),
        Collider::cuboid(2.0, 0.8, 1.0),
        StaticGeometry,
        Name::new("Table"),
    ));

    commands.spawn((
        Mesh3d(small_box.clone()),
        MaterialSlots::new(mug_material),
        Transform::from_xyz(-0.6, 0.95, 0.0),
        Interactable::new(InteractionType::Pickup, "Pick up mug").with_distance(distance),
        Highlightable::default(),
        Collider::cuboid(0.3, 0.3, 0.3),
        Name::new("Mug"),
    ));

    commands.spawn((
        Mesh3d(book_mesh.clone()),
        MaterialSlots::new(journal_material),
        Transform::from_xyz(0.2, 0.83, 0.1),
        Interactable::new(InteractionType::Journal, "Read journal").with_distance(distance),
        Highlightable::default(),
        Collider::cuboid(0.3, 0.1, 0.4),
        SecondarySound::new(
            asset_server.load("audio/journal_entry.ogg"),
            SoundPlayback::PlayOnce,
        )
        .with_caption(settings.interactable.caption_text.clone()),
        Name::new("Journal"),
    ));

    commands.spawn((
        Mesh3d(lever_mesh),
        MaterialSlots::new(lever_material),
        Transform::from_xyz(2.5, 1.0, -1.0),
        Interactable::new(InteractionType::Activate, "Pull lever")
            .with_distance(distance)
            .blocked_while_holding(),
        Highlightable::with_material(lever_highlight),
        Collider::cuboid(0.2, 0.7, 0.2),
        SecondarySound::new(
            asset_server.load("audio/lever_clunk.ogg"),
            SoundPlayback::PlayEveryTime,
        ),
        Name::new("Lever"),
    ));

    commands.spawn((
        Mesh3d(book_mesh),
        MaterialSlots::new(diary_material),
        Transform::from_xyz(0.7, 0.83, -0.2),
        // No prompt of its own: the HUD shows the configured default.
        Interactable::new(InteractionType::AudioDiary, "").with_distance(distance),
        Highlightable::default(),
        Collider::cuboid(0.3, 0.1, 0.4),
        OnDiscover::from_fn(|entity, _| {
            info!("Audio diary {:?} discovered", entity);
        }),
        Name::new("Audio Diary"),
    ));

    // The key starts on the table but belongs on the hook by the lever.
    let key = commands
        .spawn((
            Mesh3d(small_box),
            MaterialSlots::new(key_material),
            Transform::from_xyz(-0.2, 0.85, 0.3).with_scale(Vec3::new(0.5, 0.2, 0.8)),
            Interactable::new(InteractionType::Pickup, "Take key").with_distance(distance),
            Highlightable::default(),
            Collider::cuboid(0.3, 0.3, 0.3),
            Name::new("Key"),
        ))
        .id();
    commands.spawn((
        PutBackMarker::for_object(key, settings.put_back.interaction_distance),
        Collider::cuboid(0.2, 0.2, 0.2),
        Transform::from_xyz(2.5, 1.5, -1.0),
        Name::new("Key Hook"),
    ));
}

/// Toggles cursor grab when engaging mouse look.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Right) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if mouse_buttons.just_released(MouseButton::Right) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Applies mouse look while the right mouse button is held.
pub fn explorer_camera_look(
    mut motion_events: MessageReader<MouseMotion>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut query: Query<(&mut ExplorerCamera, &mut Transform)>,
) {
    let delta: Vec2 = motion_events.read().map(|ev| ev.delta).sum();
    if !mouse_buttons.pressed(MouseButton::Right) || delta == Vec2::ZERO {
        return;
    }

    if let Ok((mut camera, mut transform)) = query.single_mut() {
        let step = camera.look_sensitivity * time.delta_secs();
        camera.yaw -= delta.x * step;
        camera.pitch = (camera.pitch - delta.y * step).clamp(-MAX_PITCH, MAX_PITCH);
        transform.rotation = (Quat::from_axis_angle(Vec3::Y, camera.yaw)
            * Quat::from_axis_angle(Vec3::X, camera.pitch))
        .normalize();
    }
}

/// Walks the camera over the ground plane with WASD; Shift runs.
pub fn explorer_camera_walk(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&ExplorerCamera, &mut Transform)>,
) {
    let Ok((camera, mut transform)) = query.single_mut() else {
        return;
    };

    let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
    let forward = flatten(transform.forward().as_vec3());
    let right = flatten(transform.right().as_vec3());

    let mut direction = Vec3::ZERO;
    for (key, axis) in [
        (KeyCode::KeyW, forward),
        (KeyCode::KeyS, -forward),
        (KeyCode::KeyA, -right),
        (KeyCode::KeyD, right),
    ] {
        if keyboard.pressed(key) {
            direction += axis;
        }
    }

    if direction.length_squared() > 0.0 {
        let modifier = if keyboard.pressed(KeyCode::ShiftLeft) {
            1.8
        } else {
            1.0
        };
        transform.translation +=
            direction.normalize() * camera.walk_speed * modifier * time.delta_secs();
    }
    transform.translation.y = camera.eye_height;
}

fn yaw_pitch_from_transform(transform: &Transform) -> (f32, f32) {
    let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
    (yaw, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_pitch_round_trips_camera_rotation() {
        let camera = ExplorerCamera::new(0.7, -0.3);
        let rotation = Quat::from_axis_angle(Vec3::Y, camera.yaw)
            * Quat::from_axis_angle(Vec3::X, camera.pitch);
        let (yaw, pitch) = yaw_pitch_from_transform(&Transform::from_rotation(rotation));

        assert!((yaw - 0.7).abs() < 1e-4);
        assert!((pitch + 0.3).abs() < 1e-4);
    }
}
