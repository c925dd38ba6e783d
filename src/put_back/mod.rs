//! Put-back markers: trigger zones recording where a pickup object belongs.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PutBackPlugin;
