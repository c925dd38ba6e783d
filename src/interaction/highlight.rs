//! Highlight material application: appends one overlay material slot to every
//! renderer of an interactable and removes it again.
use bevy::{camera::primitives::Aabb, prelude::*};

use super::{
    components::{
        AppliedHighlight, Highlightable, Interactable, MaterialOverlay, MaterialSlots,
        StaticGeometry,
    },
    discovery::OnDiscover,
    errors::InteractionWarning,
    events::{HighlightAction, HighlightRequest, ObjectDiscovered},
};

/// Shared template the per-renderer highlight materials are cloned from.
#[derive(Resource, Debug, Clone, Default)]
pub struct DefaultHighlightMaterial(Option<Handle<StandardMaterial>>);

impl DefaultHighlightMaterial {
    pub fn new(handle: Handle<StandardMaterial>) -> Self {
        Self(Some(handle))
    }

    pub fn handle(&self) -> Option<&Handle<StandardMaterial>> {
        self.0.as_ref()
    }
}

/// Builds the highlight material for one renderer: a clone of `template`
/// carrying the primary material's base colour texture so the overlay lines up
/// with the object. The bool reports whether a texture was found.
pub fn highlight_material_for(
    template: &StandardMaterial,
    primary: Option<&StandardMaterial>,
) -> (StandardMaterial, bool) {
    let mut material = template.clone();
    match primary.and_then(|primary| primary.base_color_texture.clone()) {
        Some(texture) => {
            material.base_color_texture = Some(texture);
            (material, true)
        }
        None => (material, false),
    }
}

/// Processes highlight and unhighlight requests. The first highlight of an
/// object runs its discovery hook and always marks it discovered.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn apply_highlight_requests(
    mut commands: Commands,
    mut requests: MessageReader<HighlightRequest>,
    mut interactables: Query<(
        &mut Interactable,
        Option<&mut Highlightable>,
        Option<&OnDiscover>,
        Option<&Name>,
    )>,
    children: Query<&Children>,
    mut renderers: Query<(&mut MaterialSlots, Option<&Name>, Has<StaticGeometry>)>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
    default_material: Res<DefaultHighlightMaterial>,
    mut discovered: MessageWriter<ObjectDiscovered>,
) {
    for request in requests.read() {
        let entity = request.entity;
        let Ok((mut interactable, highlightable, hook, name)) = interactables.get_mut(entity)
        else {
            debug!("Highlight request for {:?} ignored: not an interactable", entity);
            continue;
        };
        let object = object_label(entity, name);
        let Some(mut highlightable) = highlightable else {
            if request.action == HighlightAction::Highlight {
                discover(&mut commands, entity, &mut interactable, hook, &mut discovered);
            }
            continue;
        };

        match request.action {
            HighlightAction::Highlight => {
                discover(&mut commands, entity, &mut interactable, hook, &mut discovered);

                if !highlightable.enabled || highlightable.is_applied() {
                    continue;
                }
                let Some(materials) = materials.as_deref_mut() else {
                    continue;
                };
                let Some(template) = highlightable
                    .material_override
                    .as_ref()
                    .or(default_material.handle())
                    .and_then(|handle| materials.get(handle))
                    .cloned()
                else {
                    continue;
                };

                let mut applied = Vec::new();
                for renderer in renderer_entities(entity, &children) {
                    let Ok((mut slots, renderer_name, is_static)) = renderers.get_mut(renderer)
                    else {
                        continue;
                    };
                    let primary = slots.primary().and_then(|handle| materials.get(handle));
                    let (material, textured) = highlight_material_for(&template, primary);
                    if !textured {
                        debug!(
                            "{}",
                            InteractionWarning::UntexturedRenderer {
                                object: object.clone(),
                                renderer: object_label(renderer, renderer_name),
                            }
                        );
                    }
                    let handle = materials.add(material);
                    slots.push(handle.clone());
                    applied.push(AppliedHighlight {
                        renderer,
                        material: handle,
                    });
                    #[cfg(feature = "interaction_debug")]
                    debug!(
                        target: "interaction_debug",
                        "{}: appended highlight slot on {:?} ({} slots)",
                        object,
                        renderer,
                        slots.len()
                    );
                    if !is_static {
                        invalidate_bounds(&mut commands, renderer);
                    }
                }
                highlightable.record_applied(applied);
            }
            HighlightAction::Unhighlight => {
                if !highlightable.is_applied() {
                    continue;
                }
                // Only slots appended by the highlight are removed; renderers
                // attached since then keep their materials.
                for AppliedHighlight { renderer, material } in highlightable.take_applied() {
                    let Ok((mut slots, _, is_static)) = renderers.get_mut(renderer) else {
                        continue;
                    };
                    if !slots.remove(&material) {
                        continue;
                    }
                    #[cfg(feature = "interaction_debug")]
                    debug!(
                        target: "interaction_debug",
                        "{}: removed highlight slot on {:?} ({} slots)",
                        object,
                        renderer,
                        slots.len()
                    );
                    if !is_static {
                        invalidate_bounds(&mut commands, renderer);
                    }
                }
            }
        }
    }
}

/// Mirrors material slots onto the renderer: slot 0 becomes the mesh material,
/// every other slot is drawn by an overlay child sharing the mesh.
#[allow(clippy::type_complexity)]
pub fn sync_material_overlays(
    mut commands: Commands,
    renderers: Query<
        (Entity, &MaterialSlots, Option<&Mesh3d>, Option<&Children>),
        Changed<MaterialSlots>,
    >,
    overlays: Query<(), With<MaterialOverlay>>,
) {
    for (entity, slots, mesh, children) in renderers.iter() {
        if let Some(primary) = slots.primary() {
            commands
                .entity(entity)
                .insert(MeshMaterial3d(primary.clone()));
        }

        if let Some(children) = children {
            for child in children.to_vec() {
                if overlays.contains(child) {
                    commands.entity(child).despawn();
                }
            }
        }

        let Some(mesh) = mesh else {
            continue;
        };
        for (index, material) in slots.overlays().iter().enumerate() {
            commands.spawn((
                Mesh3d(mesh.0.clone()),
                MeshMaterial3d(material.clone()),
                Transform::default(),
                MaterialOverlay { slot: index + 1 },
                ChildOf(entity),
            ));
        }
    }
}

fn discover(
    commands: &mut Commands,
    entity: Entity,
    interactable: &mut Interactable,
    hook: Option<&OnDiscover>,
    discovered: &mut MessageWriter<ObjectDiscovered>,
) {
    if interactable.is_discovered() {
        return;
    }
    if let Some(hook) = hook {
        hook.run(entity, commands);
    }
    interactable.mark_discovered();
    discovered.write(ObjectDiscovered {
        entity,
        interaction_type: interactable.interaction_type(),
    });
}

/// The object itself followed by all of its descendants.
fn renderer_entities(root: Entity, children: &Query<&Children>) -> Vec<Entity> {
    std::iter::once(root)
        .chain(children.iter_descendants(root))
        .collect()
}

/// Dropping the cached bounds makes the engine recompute them from the mesh.
fn invalidate_bounds(commands: &mut Commands, renderer: Entity) {
    commands.entity(renderer).remove::<Aabb>();
}

pub(crate) fn object_label(entity: Entity, name: Option<&Name>) -> String {
    name.map(|name| name.as_str().to_string())
        .unwrap_or_else(|| format!("{:?}", entity))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::interaction::{components::InteractionType, config::InteractionSettings};

    #[derive(Resource, Default)]
    struct DiscoveryLog(Vec<Entity>);

    fn collect_discoveries(
        mut reader: MessageReader<ObjectDiscovered>,
        mut log: ResMut<DiscoveryLog>,
    ) {
        log.0.extend(reader.read().map(|message| message.entity));
    }

    struct Scene {
        app: App,
        object: Entity,
        root_texture: Handle<Image>,
        renderers: Vec<Entity>,
    }

    fn textured_material(app: &mut App) -> (Handle<StandardMaterial>, Handle<Image>) {
        let texture = app
            .world_mut()
            .resource_mut::<Assets<Image>>()
            .add(Image::default());
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color_texture: Some(texture.clone()),
                ..default()
            });
        (material, texture)
    }

    fn plain_material(app: &mut App) -> Handle<StandardMaterial> {
        app.world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default())
    }

    fn spawn_object(app: &mut App) -> (Entity, Handle<Image>, Vec<Entity>) {
        let (primary, texture) = textured_material(app);
        let detail = plain_material(app);
        let child_material = plain_material(app);

        let object = app
            .world_mut()
            .spawn((
                Interactable::new(InteractionType::Pickup, "Take"),
                Highlightable::default(),
                MaterialSlots::from_handles(vec![primary, detail]),
                Aabb::from_min_max(Vec3::ZERO, Vec3::ONE),
            ))
            .id();
        let child = app
            .world_mut()
            .spawn((
                MaterialSlots::new(child_material),
                StaticGeometry,
                Aabb::from_min_max(Vec3::ZERO, Vec3::ONE),
                ChildOf(object),
            ))
            .id();
        (object, texture, vec![object, child])
    }

    fn scene() -> Scene {
        let mut app = App::new();
        app.init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<DiscoveryLog>()
            .add_message::<HighlightRequest>()
            .add_message::<ObjectDiscovered>()
            .add_systems(
                Update,
                (apply_highlight_requests, collect_discoveries).chain(),
            );

        let template = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(InteractionSettings::default().highlight_template());
        app.insert_resource(DefaultHighlightMaterial::new(template));

        let (object, root_texture, renderers) = spawn_object(&mut app);
        Scene {
            app,
            object,
            root_texture,
            renderers,
        }
    }

    fn slots(app: &App, renderers: &[Entity]) -> Vec<MaterialSlots> {
        renderers
            .iter()
            .map(|entity| {
                app.world()
                    .get::<MaterialSlots>(*entity)
                    .expect("renderer has slots")
                    .clone()
            })
            .collect()
    }

    fn send(app: &mut App, request: HighlightRequest) {
        app.world_mut().write_message(request);
        app.update();
    }

    #[test]
    fn highlight_then_unhighlight_restores_material_lists() {
        let mut scene = scene();
        let before = slots(&scene.app, &scene.renderers);

        send(&mut scene.app, HighlightRequest::highlight(scene.object));
        let during = slots(&scene.app, &scene.renderers);
        for (original, highlighted) in before.iter().zip(&during) {
            assert_eq!(highlighted.len(), original.len() + 1);
            assert_eq!(&highlighted.as_slice()[..original.len()], original.as_slice());
        }

        send(&mut scene.app, HighlightRequest::unhighlight(scene.object));
        assert_eq!(slots(&scene.app, &scene.renderers), before);
    }

    #[test]
    fn repeated_highlight_appends_once() {
        let mut scene = scene();
        let before = slots(&scene.app, &scene.renderers);

        send(&mut scene.app, HighlightRequest::highlight(scene.object));
        send(&mut scene.app, HighlightRequest::highlight(scene.object));

        for (original, highlighted) in before.iter().zip(slots(&scene.app, &scene.renderers)) {
            assert_eq!(highlighted.len(), original.len() + 1);
        }
    }

    #[test]
    fn unhighlight_without_highlight_is_noop() {
        let mut scene = scene();
        let before = slots(&scene.app, &scene.renderers);

        send(&mut scene.app, HighlightRequest::unhighlight(scene.object));
        assert_eq!(slots(&scene.app, &scene.renderers), before);
    }

    #[test]
    fn discovery_happens_once_and_runs_hook() {
        let mut scene = scene();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        scene
            .app
            .world_mut()
            .entity_mut(scene.object)
            .insert(OnDiscover::from_fn(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        let is_discovered = |app: &App, entity| {
            app.world()
                .get::<Interactable>(entity)
                .expect("interactable")
                .is_discovered()
        };
        assert!(!is_discovered(&scene.app, scene.object));

        for _ in 0..3 {
            send(&mut scene.app, HighlightRequest::highlight(scene.object));
            assert!(is_discovered(&scene.app, scene.object));
            send(&mut scene.app, HighlightRequest::unhighlight(scene.object));
            assert!(is_discovered(&scene.app, scene.object));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            scene.app.world().resource::<DiscoveryLog>().0,
            vec![scene.object]
        );
    }

    #[test]
    fn hook_commands_are_applied() {
        #[derive(Component)]
        struct Noticed;

        let mut scene = scene();
        scene
            .app
            .world_mut()
            .entity_mut(scene.object)
            .insert(OnDiscover::from_fn(|entity, commands| {
                commands.entity(entity).insert(Noticed);
            }));

        send(&mut scene.app, HighlightRequest::highlight(scene.object));
        assert!(scene.app.world().get::<Noticed>(scene.object).is_some());
    }

    #[test]
    fn each_object_keeps_its_own_highlight_texture() {
        let mut scene = scene();
        let (other, other_texture, other_renderers) = spawn_object(&mut scene.app);

        send(&mut scene.app, HighlightRequest::highlight(scene.object));
        send(&mut scene.app, HighlightRequest::highlight(other));

        let highlight_texture = |app: &App, renderer: Entity| {
            let slots = app.world().get::<MaterialSlots>(renderer).expect("slots");
            let handle = slots.as_slice().last().expect("highlight slot").clone();
            app.world()
                .resource::<Assets<StandardMaterial>>()
                .get(&handle)
                .and_then(|material| material.base_color_texture.clone())
        };

        assert_eq!(
            highlight_texture(&scene.app, scene.object),
            Some(scene.root_texture.clone())
        );
        assert_eq!(highlight_texture(&scene.app, other_renderers[0]), Some(other_texture));
    }

    #[test]
    fn unhighlight_spares_renderers_attached_after_highlight() {
        let mut scene = scene();
        send(&mut scene.app, HighlightRequest::highlight(scene.object));

        let late_material = plain_material(&mut scene.app);
        let late = scene
            .app
            .world_mut()
            .spawn((MaterialSlots::new(late_material.clone()), ChildOf(scene.object)))
            .id();

        send(&mut scene.app, HighlightRequest::unhighlight(scene.object));

        assert_eq!(
            scene.app.world().get::<MaterialSlots>(late),
            Some(&MaterialSlots::new(late_material))
        );
        for renderer in &scene.renderers {
            let slots = scene.app.world().get::<MaterialSlots>(*renderer).expect("slots");
            assert!(slots.primary().is_some());
        }
    }

    #[test]
    fn override_material_replaces_default_template() {
        let mut scene = scene();
        let override_material = scene
            .app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color: Color::srgb(0.2, 0.9, 1.0),
                alpha_mode: AlphaMode::Add,
                unlit: true,
                ..default()
            });
        scene
            .app
            .world_mut()
            .entity_mut(scene.object)
            .insert(Highlightable::with_material(override_material));

        send(&mut scene.app, HighlightRequest::highlight(scene.object));

        let world = scene.app.world();
        let slots = world.get::<MaterialSlots>(scene.object).expect("slots");
        let appended = slots.as_slice().last().expect("highlight slot");
        let material = world
            .resource::<Assets<StandardMaterial>>()
            .get(appended)
            .expect("highlight material");
        assert_eq!(material.base_color, Color::srgb(0.2, 0.9, 1.0));
        assert_ne!(
            material.base_color,
            InteractionSettings::default().highlight_template().base_color
        );
        assert_eq!(material.base_color_texture, Some(scene.root_texture.clone()));
    }

    #[test]
    fn bounds_are_invalidated_only_on_dynamic_renderers() {
        let mut scene = scene();
        send(&mut scene.app, HighlightRequest::highlight(scene.object));

        assert!(scene.app.world().get::<Aabb>(scene.renderers[0]).is_none());
        assert!(scene.app.world().get::<Aabb>(scene.renderers[1]).is_some());
    }

    #[test]
    fn disabled_highlight_still_discovers() {
        let mut scene = scene();
        scene
            .app
            .world_mut()
            .entity_mut(scene.object)
            .insert(Highlightable::disabled());
        let before = slots(&scene.app, &scene.renderers);

        send(&mut scene.app, HighlightRequest::highlight(scene.object));

        assert_eq!(slots(&scene.app, &scene.renderers), before);
        assert!(scene
            .app
            .world()
            .get::<Interactable>(scene.object)
            .expect("interactable")
            .is_discovered());
    }

    #[test]
    fn missing_template_degrades_to_no_highlight() {
        let mut scene = scene();
        scene.app.insert_resource(DefaultHighlightMaterial::default());
        let before = slots(&scene.app, &scene.renderers);

        send(&mut scene.app, HighlightRequest::highlight(scene.object));
        assert_eq!(slots(&scene.app, &scene.renderers), before);

        send(&mut scene.app, HighlightRequest::unhighlight(scene.object));
        assert_eq!(slots(&scene.app, &scene.renderers), before);
    }

    #[test]
    fn overlays_follow_material_slots() {
        let mut app = App::new();
        app.init_resource::<Assets<StandardMaterial>>()
            .add_systems(Update, sync_material_overlays);

        let primary = plain_material(&mut app);
        let highlight = plain_material(&mut app);
        let renderer = app
            .world_mut()
            .spawn((
                Mesh3d(Handle::default()),
                MaterialSlots::new(primary.clone()),
            ))
            .id();
        app.update();

        let overlay_count = |app: &mut App| {
            let mut query = app.world_mut().query::<&MaterialOverlay>();
            query.iter(app.world()).count()
        };
        assert_eq!(overlay_count(&mut app), 0);
        assert_eq!(
            app.world()
                .get::<MeshMaterial3d<StandardMaterial>>(renderer)
                .map(|material| material.0.clone()),
            Some(primary)
        );

        app.world_mut()
            .get_mut::<MaterialSlots>(renderer)
            .expect("slots")
            .push(highlight);
        app.update();
        assert_eq!(overlay_count(&mut app), 1);

        app.world_mut()
            .get_mut::<MaterialSlots>(renderer)
            .expect("slots")
            .pop();
        app.update();
        assert_eq!(overlay_count(&mut app), 0);
    }
}
