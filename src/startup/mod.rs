use bevy::prelude::*;

use crate::{data::rng::RngPlugin, systems::resize::ResizePlugin};

pub mod render;
pub mod shortcuts;

pub struct StartupPlugin;
impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((RngPlugin, ResizePlugin))
            .add_systems(Startup, render::setup_camera)
            .add_systems(Update, shortcuts::close_on_esc);
    }
}
