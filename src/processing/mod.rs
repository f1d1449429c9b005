//! Fix generation: noise, drift, composition and rate limiting

pub mod noise;
pub mod drift;
pub mod composer;
pub mod scheduler;

pub use noise::{FixNoise, NoiseModel, NoiseParameters};
pub use drift::{ConstantDrift, DriftController, DriftMode, SteeredDrift};
pub use composer::{AccuracyConstants, FixComposer};
pub use scheduler::RateScheduler;
