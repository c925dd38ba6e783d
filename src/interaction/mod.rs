//! Interactable objects: highlighting, discovery, and secondary sounds.
pub mod audio;
pub mod components;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod events;
pub mod highlight;
pub mod plugin;
pub mod systems;

pub use plugin::InteractionPlugin;
