// src/ui/mod.rs
//
// UI module providing screen-space HUD elements for first-person exploration:
// the reticle, the interaction prompt under it, and audio log captions.

pub mod hud;

// Re-export the main plugin
pub use hud::UiPlugin;
