use bevy::prelude::*;
use enum_map::{Enum, EnumMap};

pub struct GlyphsPlugin;
impl Plugin for GlyphsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GlyphRamps>()
            .add_systems(Update, GlyphRamps::cycle_on_key);
    }
}

/// Cells whose summed amplitude stays below this render nothing.
pub const AMPLITUDE_EPSILON: f64 = 0.01;

/// The classic ASCII brightness ordering, densest first.
const BRIGHTNESS_ORDER: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampKind {
    #[default]
    Dots,
    Shades,
    Brightness,
}

impl RampKind {
    fn build(self) -> GlyphRamp {
        match self {
            RampKind::Dots => GlyphRamp::new("-∘◦•○◎◍●◉⬤".chars().collect()),
            RampKind::Shades => GlyphRamp::new(" ░▒▓█".chars().collect()),
            // Reversed so index 0 is the lightest glyph.
            RampKind::Brightness => GlyphRamp::new(BRIGHTNESS_ORDER.chars().rev().collect()),
        }
    }

    fn next(self) -> Self {
        match self {
            RampKind::Dots => RampKind::Shades,
            RampKind::Shades => RampKind::Brightness,
            RampKind::Brightness => RampKind::Dots,
        }
    }
}

/// Ordered glyphs, low to high implied visual weight.
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    fn new(glyphs: Vec<char>) -> Self {
        assert!(glyphs.len() >= 2, "a glyph ramp needs at least two steps");
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph encoding a summed cell amplitude.
    pub fn glyph_for(&self, total_amplitude: f64) -> char {
        self.glyphs[glyph_index(total_amplitude, self.glyphs.len())]
    }
}

/// The named ramp presets plus the one currently selected.
#[derive(Resource)]
pub struct GlyphRamps {
    ramps: EnumMap<RampKind, GlyphRamp>,
    pub current: RampKind,
}

impl Default for GlyphRamps {
    fn default() -> Self {
        Self {
            ramps: EnumMap::from_fn(RampKind::build),
            current: RampKind::default(),
        }
    }
}

impl GlyphRamps {
    pub fn active(&self) -> &GlyphRamp {
        &self.ramps[self.current]
    }

    pub fn cycle(&mut self) {
        self.current = self.current.next();
    }

    fn cycle_on_key(keyboard_input: Res<ButtonInput<KeyCode>>, mut ramps: ResMut<GlyphRamps>) {
        if keyboard_input.just_pressed(KeyCode::KeyC) {
            ramps.cycle();
            info!("Switched glyph ramp to {:?}", ramps.current);
        }
    }
}

/// Maps an unbounded summed amplitude to a ramp index. `tanh` saturates the
/// sum into (-1, 1); the final clamp keeps the index in range no matter what.
pub fn glyph_index(total_amplitude: f64, ramp_len: usize) -> usize {
    let normalized = total_amplitude.tanh();
    let unit = (normalized + 1.0) / 2.0;
    let index = (unit * (ramp_len - 1) as f64).floor() as usize;
    index.min(ramp_len - 1)
}

/// Greyish-blue tone for a cell. Channel values are floored at mid-grey so
/// faint glyphs stay legible; the blue channel is pinned at 220.
pub fn amplitude_color(total_amplitude: f64) -> Color {
    let value = (((total_amplitude + 1.0) / 2.0 * 255.0).floor() as i64).clamp(127, 255) as u8;
    Color::srgb_u8(value, value, 220)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_resolves_to_the_ramp_ends() {
        assert_eq!(glyph_index(1000.0, 10), 9);
        assert_eq!(glyph_index(-1000.0, 10), 0);
    }

    #[test]
    fn zero_amplitude_lands_mid_ramp() {
        assert_eq!(glyph_index(0.0, 10), 4);
    }

    #[test]
    fn glyph_index_never_leaves_the_ramp() {
        for step in -60..=60 {
            let amplitude = step as f64 * 0.1;
            for ramp_len in 2..12 {
                assert!(glyph_index(amplitude, ramp_len) < ramp_len);
            }
        }
    }

    #[test]
    fn color_channels_are_floored_at_mid_grey() {
        assert_eq!(amplitude_color(-1.0), Color::srgb_u8(127, 127, 220));
        assert_eq!(amplitude_color(-1000.0), Color::srgb_u8(127, 127, 220));
        assert_eq!(amplitude_color(0.0), Color::srgb_u8(127, 127, 220));
    }

    #[test]
    fn color_channels_are_capped_at_full_brightness() {
        assert_eq!(amplitude_color(1.0), Color::srgb_u8(255, 255, 220));
        assert_eq!(amplitude_color(1000.0), Color::srgb_u8(255, 255, 220));
    }

    #[test]
    fn every_preset_has_at_least_two_steps() {
        let ramps = GlyphRamps::default();
        for kind in [RampKind::Dots, RampKind::Shades, RampKind::Brightness] {
            assert!(ramps.ramps[kind].len() >= 2, "{kind:?} is too short");
        }
    }

    #[test]
    fn dots_ramp_runs_from_dash_to_filled_circle() {
        let ramps = GlyphRamps::default();
        let dots = &ramps.ramps[RampKind::Dots];
        assert_eq!(dots.glyph_for(-1000.0), '-');
        assert_eq!(dots.glyph_for(1000.0), '⬤');
    }

    #[test]
    fn cycling_visits_every_preset_and_wraps() {
        let mut ramps = GlyphRamps::default();
        assert_eq!(ramps.current, RampKind::Dots);
        ramps.cycle();
        assert_eq!(ramps.current, RampKind::Shades);
        ramps.cycle();
        assert_eq!(ramps.current, RampKind::Brightness);
        ramps.cycle();
        assert_eq!(ramps.current, RampKind::Dots);
    }
}
