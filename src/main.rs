use bevy::prelude::*;

mod data;
mod entities;
mod startup;
mod systems;

use entities::fish::FishPlugin;
use startup::StartupPlugin;
use systems::{
    glyphs::GlyphsPlugin, grid::FieldGridPlugin, ripples::RipplePlugin, FrameOrder,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: String::from("ascii ripple"),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RippleEnginePlugin)
        .run();
}

struct RippleEnginePlugin;

impl Plugin for RippleEnginePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameOrder::Spawn,
                FrameOrder::Move,
                FrameOrder::Sample,
                FrameOrder::Prune,
            )
                .chain(),
        )
        .add_plugins(StartupPlugin)
        .add_plugins((RipplePlugin, GlyphsPlugin, FieldGridPlugin, FishPlugin));
    }
}
