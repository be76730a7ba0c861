use bevy::{math::DVec2, prelude::*, window::PrimaryWindow};
use rand::Rng;

use crate::{
    data::rng::GlobalRng,
    startup::render::MainCamera,
    systems::{
        grid::{cell_center, grid_dimensions},
        interaction::cursor_surface_position,
        resize::SurfaceSize,
        FrameOrder,
    },
};

pub const SEGMENT_COUNT: usize = 10;
pub const SEGMENT_LENGTH: f64 = 15.0;
/// A grid cell within this distance of a segment renders the fish instead
/// of the ripple field.
const FISH_CELL_RADIUS: f64 = 10.0;
/// Seconds between wander-target picks.
const TARGET_INTERVAL: f32 = 2.0;
/// Segment glyphs by size, thinnest to thickest.
const FISH_GLYPHS: [char; 5] = [' ', '░', '▒', '▓', '█'];

pub const FISH_COLOR: Color = Color::srgb(0.4, 0.6, 0.8);
pub const CURSOR_MARKER: char = '◓';
pub const CURSOR_MARKER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

pub struct FishPlugin;
impl Plugin for FishPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FishMode>()
            .add_systems(Startup, Fish::spawn)
            .add_systems(Update, Fish::toggle_mode.in_set(FrameOrder::Spawn))
            .add_systems(Update, Fish::swim.in_set(FrameOrder::Move));
    }
}

/// Whether the fish chases the cursor or wanders between random cells.
/// Left click toggles (and still spawns a ripple).
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FishMode {
    #[default]
    FollowCursor,
    Wander,
}

impl FishMode {
    fn toggled(self) -> Self {
        match self {
            FishMode::FollowCursor => FishMode::Wander,
            FishMode::Wander => FishMode::FollowCursor,
        }
    }
}

/// A segmented fish swimming over the field. Segments trail the head at a
/// fixed spacing; each renders a glyph sized by its position in the chain.
#[derive(Component)]
pub struct Fish {
    segments: Vec<DVec2>,
    sizes: Vec<usize>,
    target: Option<DVec2>,
    retarget: Timer,
}

impl Fish {
    pub fn new(start: DVec2) -> Self {
        Self {
            segments: vec![start; SEGMENT_COUNT],
            sizes: segment_sizes(),
            target: None,
            retarget: Timer::from_seconds(TARGET_INTERVAL, TimerMode::Repeating),
        }
    }

    pub fn segments(&self) -> &[DVec2] {
        &self.segments
    }

    /// Fish glyph covering `point`, if any segment is close enough.
    pub fn glyph_at(&self, point: DVec2) -> Option<char> {
        self.segments
            .iter()
            .zip(&self.sizes)
            .find_map(|(segment, &size)| {
                (point.distance(*segment) < FISH_CELL_RADIUS).then(|| FISH_GLYPHS[size])
            })
    }

    /// One movement step: the head advances toward `target` by at most one
    /// segment length, then every follower closes up to exactly
    /// `SEGMENT_LENGTH` behind its leader.
    pub fn advance_toward(&mut self, target: DVec2) {
        let head = self.segments[0];
        let offset = target - head;
        let distance = offset.length();
        if distance > 0.0 {
            self.segments[0] = head + offset / distance * distance.min(SEGMENT_LENGTH);
        }

        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1];
            let follower = self.segments[i];
            let offset = leader - follower;
            let distance = offset.length();
            if distance > 0.0 {
                let shift = distance - SEGMENT_LENGTH;
                self.segments[i] = follower + offset / distance * shift;
            }
        }
    }

    fn spawn(mut commands: Commands, surface: Res<SurfaceSize>) {
        commands.spawn(Fish::new(surface.center()));
    }

    fn toggle_mode(
        mouse_input: Res<ButtonInput<MouseButton>>,
        mut mode: ResMut<FishMode>,
        mut fish_query: Query<&mut Fish>,
    ) {
        if !mouse_input.just_pressed(MouseButton::Left) {
            return;
        }

        *mode = mode.toggled();
        info!("Fish mode: {:?}", *mode);

        // Force an immediate retarget when wandering resumes.
        for mut fish in &mut fish_query {
            fish.target = None;
            let interval = fish.retarget.duration();
            fish.retarget.set_elapsed(interval);
        }
    }

    fn swim(
        time: Res<Time>,
        mode: Res<FishMode>,
        surface: Res<SurfaceSize>,
        mut rng: ResMut<GlobalRng>,
        window: Single<&Window, With<PrimaryWindow>>,
        camera: Single<(&Camera, &GlobalTransform), With<MainCamera>>,
        mut fish_query: Query<&mut Fish>,
    ) {
        for mut fish in &mut fish_query {
            let target = match *mode {
                FishMode::FollowCursor => {
                    let (camera, camera_transform) = *camera;
                    cursor_surface_position(&window, camera, camera_transform, &surface)
                }
                FishMode::Wander => {
                    fish.retarget.tick(time.delta());
                    if fish.target.is_none() || fish.retarget.just_finished() {
                        fish.target = Some(random_cell_target(&surface, &mut rng));
                    }
                    fish.target
                }
            };

            if let Some(target) = target {
                fish.advance_toward(target);
            }
        }
    }
}

/// Sizes ramp up to the chain midpoint and back down, giving the chain a
/// fish silhouette.
fn segment_sizes() -> Vec<usize> {
    let half = (SEGMENT_COUNT - 1) as f64 / 2.0;
    (0..SEGMENT_COUNT)
        .map(|i| {
            let along = if i as f64 <= half {
                i as f64
            } else {
                (SEGMENT_COUNT - 1 - i) as f64
            };
            (along / half * (FISH_GLYPHS.len() - 1) as f64) as usize
        })
        .collect()
}

fn random_cell_target(surface: &SurfaceSize, rng: &mut GlobalRng) -> DVec2 {
    let (cols, rows) = grid_dimensions(surface);
    let col = rng.uniform.random_range(0..cols.max(1));
    let row = rng.uniform.random_range(0..rows.max(1));
    cell_center(col, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_sizes_are_symmetric_around_the_midpoint() {
        let sizes = segment_sizes();
        assert_eq!(sizes.len(), SEGMENT_COUNT);
        for i in 0..SEGMENT_COUNT {
            assert_eq!(sizes[i], sizes[SEGMENT_COUNT - 1 - i]);
        }
        assert_eq!(sizes[0], 0, "the tail ends thin");
        assert!(
            sizes[SEGMENT_COUNT / 2] > sizes[0],
            "the body is thickest in the middle"
        );
    }

    #[test]
    fn the_head_moves_at_most_one_segment_length() {
        let mut fish = Fish::new(DVec2::ZERO);
        fish.advance_toward(DVec2::new(1000.0, 0.0));
        assert!((fish.segments()[0].x - SEGMENT_LENGTH).abs() < 1e-9);

        let mut fish = Fish::new(DVec2::ZERO);
        fish.advance_toward(DVec2::new(4.0, 0.0));
        assert!((fish.segments()[0].x - 4.0).abs() < 1e-9);
    }

    #[test]
    fn followers_close_up_to_the_fixed_spacing() {
        let mut fish = Fish::new(DVec2::ZERO);
        // Scatter the chain, then take one step.
        for (i, segment) in fish.segments.iter_mut().enumerate() {
            *segment = DVec2::new(i as f64 * 40.0, (i % 2) as f64 * 25.0);
        }
        fish.advance_toward(DVec2::new(-100.0, 0.0));

        for pair in fish.segments().windows(2) {
            let spacing = pair[0].distance(pair[1]);
            assert!(
                (spacing - SEGMENT_LENGTH).abs() < 1e-9,
                "spacing should settle at {SEGMENT_LENGTH}, got {spacing}"
            );
        }
    }

    #[test]
    fn glyph_at_reports_cells_near_a_segment_only() {
        let mut fish = Fish::new(DVec2::ZERO);
        for (i, segment) in fish.segments.iter_mut().enumerate() {
            *segment = DVec2::new(i as f64 * SEGMENT_LENGTH, 0.0);
        }

        // The midpoint segment carries the thickest glyph in its cell.
        let mid = fish.segments()[SEGMENT_COUNT / 2];
        assert!(fish.glyph_at(mid + DVec2::new(3.0, 3.0)).is_some());
        assert_eq!(fish.glyph_at(DVec2::new(1000.0, 1000.0)), None);
    }

    #[test]
    fn toggling_the_mode_flips_between_follow_and_wander() {
        assert_eq!(FishMode::FollowCursor.toggled(), FishMode::Wander);
        assert_eq!(FishMode::Wander.toggled(), FishMode::FollowCursor);
    }
}
