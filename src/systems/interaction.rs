use bevy::{math::DVec2, prelude::*};

use crate::systems::resize::SurfaceSize;

/// Cursor position projected into surface coordinates, if the cursor is
/// currently over the window.
pub fn cursor_surface_position(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    surface: &SurfaceSize,
) -> Option<DVec2> {
    let screen_position = window.cursor_position()?;
    let world_position = camera
        .viewport_to_world_2d(camera_transform, screen_position)
        .ok()?;
    Some(surface.to_surface(world_position))
}
