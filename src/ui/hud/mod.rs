// src/ui/hud/mod.rs
//
// Reticle, interaction prompt, and caption overlay.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::UiPlugin;
