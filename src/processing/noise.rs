//! Bounded uniform noise for fabricated fixes

use crate::core::NOISE_DEG_PER_METER;
use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Noise amplitudes. Both bounds are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    /// Position noise bound (meters)
    pub position_noise_m: f64,
    /// Velocity noise bound per axis (m/s)
    pub velocity_noise_mps: f64,
}

impl NoiseParameters {
    /// No perturbation at all
    pub fn disabled() -> Self {
        Self {
            position_noise_m: 0.0,
            velocity_noise_mps: 0.0,
        }
    }
}

/// Noise applied to a single fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixNoise {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    pub velocity_mps: Vector3<f64>,
}

impl FixNoise {
    pub fn zero() -> Self {
        Self {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_m: 0.0,
            velocity_mps: Vector3::zeros(),
        }
    }
}

/// Stateless sampler of uniform noise.
///
/// Each axis is drawn independently from `[-bound, +bound]`. The plain
/// `sample_*` methods use the thread-local generator; the `*_with` forms
/// take any `Rng` so callers can seed them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseModel {
    params: NoiseParameters,
}

impl NoiseModel {
    pub fn new(params: NoiseParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> NoiseParameters {
        self.params
    }

    /// Bound on latitude/longitude noise in degrees
    pub fn position_bound_deg(&self) -> f64 {
        self.params.position_noise_m * NOISE_DEG_PER_METER
    }

    pub fn sample_position_noise(&self) -> (f64, f64) {
        self.sample_position_noise_with(&mut rand::thread_rng())
    }

    pub fn sample_altitude_noise(&self) -> f64 {
        self.sample_altitude_noise_with(&mut rand::thread_rng())
    }

    pub fn sample_velocity_noise(&self) -> Vector3<f64> {
        self.sample_velocity_noise_with(&mut rand::thread_rng())
    }

    /// Draw every noise term needed for one fix
    pub fn sample(&self) -> FixNoise {
        self.sample_with(&mut rand::thread_rng())
    }

    pub fn sample_position_noise_with<R: Rng>(&self, rng: &mut R) -> (f64, f64) {
        let bound = self.position_bound_deg();
        (uniform(rng, bound), uniform(rng, bound))
    }

    pub fn sample_altitude_noise_with<R: Rng>(&self, rng: &mut R) -> f64 {
        uniform(rng, self.params.position_noise_m)
    }

    pub fn sample_velocity_noise_with<R: Rng>(&self, rng: &mut R) -> Vector3<f64> {
        let bound = self.params.velocity_noise_mps;
        Vector3::new(uniform(rng, bound), uniform(rng, bound), uniform(rng, bound))
    }

    pub fn sample_with<R: Rng>(&self, rng: &mut R) -> FixNoise {
        let (latitude_deg, longitude_deg) = self.sample_position_noise_with(rng);
        FixNoise {
            latitude_deg,
            longitude_deg,
            altitude_m: self.sample_altitude_noise_with(rng),
            velocity_mps: self.sample_velocity_noise_with(rng),
        }
    }
}

/// Uniform sample in `[-bound, bound]`; zero when the bound is zero.
/// The bound is capped so the range width stays finite.
fn uniform<R: Rng>(rng: &mut R, bound: f64) -> f64 {
    if bound > 0.0 {
        let bound = bound.min(f64::MAX / 2.0);
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}
