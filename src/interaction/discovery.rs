//! Extension point run when an interactable is discovered.
use bevy::prelude::*;

/// Extra side effects for the first highlight of an object. The discovered
/// flag is set by the highlight flow after the hook returns.
pub trait DiscoveryHook: Send + Sync + 'static {
    fn on_discovered(&self, entity: Entity, commands: &mut Commands);
}

impl<F> DiscoveryHook for F
where
    F: Fn(Entity, &mut Commands) + Send + Sync + 'static,
{
    fn on_discovered(&self, entity: Entity, commands: &mut Commands) {
        self(entity, commands)
    }
}

/// Attaches a [`DiscoveryHook`] to an interactable.
#[derive(Component)]
pub struct OnDiscover(Box<dyn DiscoveryHook>);

impl OnDiscover {
    pub fn new(hook: impl DiscoveryHook) -> Self {
        Self(Box::new(hook))
    }

    pub fn from_fn<F>(hook: F) -> Self
    where
        F: Fn(Entity, &mut Commands) + Send + Sync + 'static,
    {
        Self(Box::new(hook))
    }

    pub fn run(&self, entity: Entity, commands: &mut Commands) {
        self.0.on_discovered(entity, commands);
    }
}
