// src/ui/hud/components.rs
//
// Marker components for HUD nodes.

use bevy::prelude::*;

/// Small dot at the screen centre.
#[derive(Component, Debug)]
pub struct Reticle;

/// Text under the reticle naming what the targeted object does.
#[derive(Component, Debug)]
pub struct ReticlePrompt;

/// Caption shown while a captioned secondary sound plays.
#[derive(Component, Debug)]
pub struct CaptionLabel;
