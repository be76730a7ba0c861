use std::f64::consts::TAU;

use bevy::math::DVec2;

/// Propagation parameters of one wave source, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleParameters {
    /// Expansion rate of the wavefront, pixels per second.
    pub speed: f64,
    /// Unitless amplitude scale.
    pub wave_height: f64,
    /// Pixels, strictly positive.
    pub wavelength: f64,
    /// Pixels, strictly positive. A point only receives energy while it sits
    /// within this distance of the current wavefront radius.
    pub wavefront_thickness: f64,
}

impl Default for RippleParameters {
    fn default() -> Self {
        Self {
            speed: 100.0,
            wave_height: 1.0,
            wavelength: 50.0,
            wavefront_thickness: 50.0,
        }
    }
}

impl RippleParameters {
    /// Panics on non-positive wavelength or thickness. Bad parameters are a
    /// construction-time fault, never handled during sampling.
    pub fn validated(self) -> Self {
        assert!(
            self.wavelength > 0.0,
            "ripple wavelength must be positive, got {}",
            self.wavelength
        );
        assert!(
            self.wavefront_thickness > 0.0,
            "ripple wavefront thickness must be positive, got {}",
            self.wavefront_thickness
        );
        self
    }
}

/// One point-origin expanding circular wave. Immutable after creation.
#[derive(Clone, Copy, Debug)]
pub struct RippleSource {
    pub origin: DVec2,
    /// Seconds on the app's monotonic clock.
    pub birth_time: f64,
    pub parameters: RippleParameters,
}

impl RippleSource {
    pub fn new(origin: DVec2, birth_time: f64, parameters: RippleParameters) -> Self {
        Self {
            origin,
            birth_time,
            parameters: parameters.validated(),
        }
    }

    fn elapsed(&self, now: f64) -> f64 {
        now - self.birth_time
    }

    /// Radius at which this ripple's energy is currently concentrated.
    pub fn wavefront_radius(&self, now: f64) -> f64 {
        self.parameters.speed * self.elapsed(now).max(0.0)
    }

    /// Amplitude this source contributes at `point`. Exactly zero outside
    /// the wavefront gate, and for a source not yet born (clock skew).
    pub fn contribution(&self, point: DVec2, now: f64) -> f64 {
        let elapsed = self.elapsed(now);
        if elapsed < 0.0 {
            return 0.0;
        }

        let distance = point.distance(self.origin);
        let offset = distance - self.parameters.speed * elapsed;
        if offset.abs() >= self.parameters.wavefront_thickness {
            return 0.0;
        }

        let phase = offset * (TAU / self.parameters.wavelength);
        self.parameters.wave_height * phase.cos() * decay_envelope(elapsed)
    }

    /// A source is spent once its wavefront has expanded past `max_expansion`.
    pub fn is_expired(&self, now: f64, max_expansion: f64) -> bool {
        self.elapsed(now) * self.parameters.speed >= max_expansion
    }
}

/// Temporal attenuation of a ripple over its lifetime, independent of
/// distance. Strictly decreasing in `elapsed`.
pub fn decay_envelope(elapsed: f64) -> f64 {
    1.0 / (1.0 + elapsed)
}

/// Summed interference of every active source at one sample point. Pure:
/// the result depends only on the arguments.
pub fn total_amplitude(point: DVec2, now: f64, sources: &[RippleSource]) -> f64 {
    sources
        .iter()
        .map(|source| source.contribution(point, now))
        .sum()
}
