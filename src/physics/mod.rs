//! Physics classification: avian3d colliders sorted into game layers.
pub mod layers;
pub mod plugin;

pub use plugin::PhysicsPlugin;
