use bevy::{
    math::DVec2,
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};

pub struct ResizePlugin;
impl Plugin for ResizePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceSize>()
            .insert_resource(ResizeDebounce::default())
            .add_systems(PreStartup, SurfaceSize::init)
            .add_systems(Update, handle_resize);
    }
}

#[derive(Resource)]
pub struct ResizeDebounce {
    pub timer: Timer,
}

impl Default for ResizeDebounce {
    fn default() -> Self {
        let mut timer = Timer::from_seconds(0.1, TimerMode::Once);
        timer.pause();
        Self { timer }
    }
}

/// Current drawing-surface dimensions in pixels. Surface coordinates put the
/// origin at the top-left corner with y pointing down.
#[derive(Resource, Default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    fn init(mut surface: ResMut<SurfaceSize>, window: Single<&Window, With<PrimaryWindow>>) {
        surface.width = window.width() as f64;
        surface.height = window.height() as f64;
    }

    /// Wavefront radius past which a ripple is dropped from the active set.
    pub fn max_expansion(&self) -> f64 {
        1.5 * self.width.max(self.height)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Surface coordinates to Bevy world coordinates (centered origin, y up).
    pub fn to_world(&self, point: DVec2) -> Vec2 {
        Vec2::new(
            (point.x - self.width * 0.5) as f32,
            (self.height * 0.5 - point.y) as f32,
        )
    }

    pub fn to_surface(&self, world: Vec2) -> DVec2 {
        DVec2::new(
            world.x as f64 + self.width * 0.5,
            self.height * 0.5 - world.y as f64,
        )
    }
}

/// Tracks resize events: updates the stored surface size immediately and
/// arms the debounce timer that gates grid rebuilds.
fn handle_resize(
    mut resize_events: EventReader<WindowResized>,
    time: Res<Time>,
    mut debounce: ResMut<ResizeDebounce>,
    mut surface: ResMut<SurfaceSize>,
) {
    for event in resize_events.read() {
        // Minimized windows report zero dimensions.
        if event.width <= 0.0 || event.height <= 0.0 {
            continue;
        }
        surface.width = event.width as f64;
        surface.height = event.height as f64;
        debounce.timer.reset();
        debounce.timer.unpause();
    }

    debounce.timer.tick(time.delta());
}
