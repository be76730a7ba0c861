use bevy::{math::DVec2, prelude::*, window::PrimaryWindow};

use crate::{
    startup::render::MainCamera,
    systems::{
        field::{RippleParameters, RippleSource},
        interaction::cursor_surface_position,
        resize::SurfaceSize,
        FrameOrder,
    },
};

pub struct RipplePlugin;
impl Plugin for RipplePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveRipples>()
            .add_systems(
                Update,
                ActiveRipples::spawn_on_click.in_set(FrameOrder::Spawn),
            )
            .add_systems(Update, ActiveRipples::prune.in_set(FrameOrder::Prune));
    }
}

/// The owned container of live wave sources. Clicks append, expiry removes;
/// the sampling sweep only ever sees the snapshot slice.
#[derive(Resource, Default)]
pub struct ActiveRipples(Vec<RippleSource>);

impl ActiveRipples {
    /// Constructs a source with the fixed click defaults. Never fails;
    /// growth is bounded only by the expiry rule.
    pub fn add_source(&mut self, origin: DVec2, now: f64) {
        self.0
            .push(RippleSource::new(origin, now, RippleParameters::default()));
    }

    pub fn sources(&self) -> &[RippleSource] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops every source whose wavefront has expanded past `max_expansion`.
    /// Runs after sampling, so a source still contributes on the frame in
    /// which it crosses the threshold.
    pub fn prune_expired(&mut self, now: f64, max_expansion: f64) {
        self.0
            .retain(|source| !source.is_expired(now, max_expansion));
    }

    fn spawn_on_click(
        mouse_input: Res<ButtonInput<MouseButton>>,
        time: Res<Time>,
        surface: Res<SurfaceSize>,
        window: Single<&Window, With<PrimaryWindow>>,
        camera: Single<(&Camera, &GlobalTransform), With<MainCamera>>,
        mut ripples: ResMut<ActiveRipples>,
    ) {
        if !mouse_input.just_pressed(MouseButton::Left) {
            return;
        }

        let (camera, camera_transform) = *camera;
        let Some(origin) = cursor_surface_position(&window, camera, camera_transform, &surface)
        else {
            return;
        };

        ripples.add_source(origin, time.elapsed_secs_f64());
        debug!("Spawned ripple at {origin} ({} active)", ripples.len());
    }

    fn prune(time: Res<Time>, surface: Res<SurfaceSize>, mut ripples: ResMut<ActiveRipples>) {
        ripples.prune_expired(time.elapsed_secs_f64(), surface.max_expansion());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_append_sources_with_the_fixed_defaults() {
        let mut ripples = ActiveRipples::default();
        ripples.add_source(DVec2::new(100.0, 100.0), 2.5);

        let source = &ripples.sources()[0];
        assert_eq!(source.origin, DVec2::new(100.0, 100.0));
        assert_eq!(source.birth_time, 2.5);
        assert_eq!(source.parameters, RippleParameters::default());
    }

    #[test]
    fn prune_removes_sources_at_the_expansion_bound() {
        // 400x400 surface: max_expansion = 600, so a speed-100 source born
        // at t = 0 expires at t = 6.
        let max_expansion = 600.0;
        let mut ripples = ActiveRipples::default();
        ripples.add_source(DVec2::ZERO, 0.0);

        ripples.prune_expired(5.999, max_expansion);
        assert_eq!(ripples.len(), 1, "source should survive just before the bound");

        ripples.prune_expired(6.001, max_expansion);
        assert!(ripples.is_empty(), "source should be gone just past the bound");
    }

    #[test]
    fn prune_only_touches_expired_sources() {
        let mut ripples = ActiveRipples::default();
        ripples.add_source(DVec2::ZERO, 0.0);
        ripples.add_source(DVec2::new(50.0, 50.0), 5.0);

        ripples.prune_expired(7.0, 600.0);

        assert_eq!(ripples.len(), 1);
        assert_eq!(ripples.sources()[0].birth_time, 5.0);
    }

    #[test]
    fn a_shrinking_surface_tightens_the_bound() {
        let mut ripples = ActiveRipples::default();
        ripples.add_source(DVec2::ZERO, 0.0);

        // Wide surface: still alive at t = 4.
        ripples.prune_expired(4.0, SurfaceSize { width: 400.0, height: 400.0 }.max_expansion());
        assert_eq!(ripples.len(), 1);

        // Shrunk surface: the same source is now past the bound.
        ripples.prune_expired(4.0, SurfaceSize { width: 200.0, height: 200.0 }.max_expansion());
        assert!(ripples.is_empty());
    }
}
