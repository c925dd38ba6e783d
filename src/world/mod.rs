//! World module housing the demo scene and first-person camera controls.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
