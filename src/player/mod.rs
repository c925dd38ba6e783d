//! Player interaction module - reticle targeting, pickup, and put-back.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
