use bevy::{math::DVec2, prelude::*, window::PrimaryWindow};

use crate::{
    entities::fish::{Fish, FishMode, CURSOR_MARKER, CURSOR_MARKER_COLOR, FISH_COLOR},
    startup::render::MainCamera,
    systems::{
        field::total_amplitude,
        glyphs::{amplitude_color, GlyphRamps, AMPLITUDE_EPSILON},
        interaction::cursor_surface_position,
        resize::{ResizeDebounce, SurfaceSize},
        ripples::ActiveRipples,
        FrameOrder,
    },
};

pub const CELL_WIDTH: f64 = 10.0;
pub const CELL_HEIGHT: f64 = 20.0;
const CELL_FONT_SIZE: f32 = 12.0;

pub struct FieldGridPlugin;
impl Plugin for FieldGridPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, FieldCell::spawn_grid)
            .add_systems(Update, FieldCell::rebuild_on_resize)
            .add_systems(Update, FieldCell::update_cells.in_set(FrameOrder::Sample));
    }
}

/// Columns and rows of the sample grid for the current surface. Derived
/// state: recomputed from the surface size, never persisted.
pub fn grid_dimensions(surface: &SurfaceSize) -> (usize, usize) {
    let cols = (surface.width / CELL_WIDTH).floor() as usize;
    let rows = (surface.height / CELL_HEIGHT).floor() as usize;
    (cols, rows)
}

/// Center of a grid cell in surface coordinates.
pub fn cell_center(col: usize, row: usize) -> DVec2 {
    DVec2::new(
        col as f64 * CELL_WIDTH + CELL_WIDTH / 2.0,
        row as f64 * CELL_HEIGHT + CELL_HEIGHT / 2.0,
    )
}

/// Center of the cell containing an arbitrary surface point.
pub fn containing_cell_center(point: DVec2) -> DVec2 {
    cell_center(
        (point.x.max(0.0) / CELL_WIDTH).floor() as usize,
        (point.y.max(0.0) / CELL_HEIGHT).floor() as usize,
    )
}

/// One glyph cell of the sample grid.
#[derive(Component)]
pub struct FieldCell {
    pub center: DVec2,
}

impl FieldCell {
    fn spawn_grid(mut commands: Commands, surface: Res<SurfaceSize>) {
        spawn_cells(&mut commands, &surface);
    }

    /// Tears the grid down and respawns it once a resize has settled.
    fn rebuild_on_resize(
        mut commands: Commands,
        debounce: Res<ResizeDebounce>,
        surface: Res<SurfaceSize>,
        cells: Query<Entity, With<FieldCell>>,
    ) {
        if !debounce.timer.just_finished() {
            return;
        }

        for entity in &cells {
            commands.entity(entity).despawn();
        }
        spawn_cells(&mut commands, &surface);
    }

    /// The per-frame sweep: every cell first offers itself to the fish
    /// layer, then samples the ripple field. Runs before pruning, so a
    /// source expiring this frame is still sampled once.
    fn update_cells(
        time: Res<Time>,
        ripples: Res<ActiveRipples>,
        ramps: Res<GlyphRamps>,
        surface: Res<SurfaceSize>,
        mode: Res<FishMode>,
        fish_query: Query<&Fish>,
        window: Single<&Window, With<PrimaryWindow>>,
        camera: Single<(&Camera, &GlobalTransform), With<MainCamera>>,
        mut cells: Query<(&FieldCell, &mut Text2d, &mut TextColor, &mut Visibility)>,
    ) {
        let now = time.elapsed_secs_f64();
        let ramp = ramps.active();
        let sources = ripples.sources();
        let fish = fish_query.single().ok();

        let cursor_cell = matches!(*mode, FishMode::FollowCursor)
            .then(|| {
                let (camera, camera_transform) = *camera;
                cursor_surface_position(&window, camera, camera_transform, &surface)
            })
            .flatten()
            .map(containing_cell_center);

        for (cell, mut text, mut color, mut visibility) in &mut cells {
            if let Some(glyph) = fish.and_then(|fish| fish.glyph_at(cell.center)) {
                set_cell(&mut text, &mut color, &mut visibility, glyph, FISH_COLOR);
                continue;
            }

            if cursor_cell.is_some_and(|marker| marker.abs_diff_eq(cell.center, 0.5)) {
                set_cell(
                    &mut text,
                    &mut color,
                    &mut visibility,
                    CURSOR_MARKER,
                    CURSOR_MARKER_COLOR,
                );
                continue;
            }

            let total = total_amplitude(cell.center, now, sources);
            if total.abs() < AMPLITUDE_EPSILON {
                *visibility = Visibility::Hidden;
                continue;
            }

            set_cell(
                &mut text,
                &mut color,
                &mut visibility,
                ramp.glyph_for(total),
                amplitude_color(total),
            );
        }
    }
}

fn spawn_cells(commands: &mut Commands, surface: &SurfaceSize) {
    let (cols, rows) = grid_dimensions(surface);
    for col in 0..cols {
        for row in 0..rows {
            let center = cell_center(col, row);
            commands.spawn((
                FieldCell { center },
                Text2d::new(""),
                TextFont {
                    font_size: CELL_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Visibility::Hidden,
                Transform::from_translation(surface.to_world(center).extend(0.0)),
            ));
        }
    }
}

fn set_cell(
    text: &mut Text2d,
    color: &mut TextColor,
    visibility: &mut Visibility,
    glyph: char,
    tone: Color,
) {
    text.0.clear();
    text.0.push(glyph);
    color.0 = tone;
    *visibility = Visibility::Visible;
}
