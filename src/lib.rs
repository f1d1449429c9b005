//! Fake GPS fix generator
//!
//! Produces a stream of synthetic GPS fixes around a simulated position at a
//! fixed rate. While spoofing is active the reported position drifts away
//! from the simulated one, either by a constant per-fix step or under
//! operator stick control, with bounded random noise on every fix.

pub mod core;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod link;
pub mod api;
pub mod logging;

// Re-export commonly used types
pub use core::{ControlInput, DriftDelta, DriftState, FixRecord, FixType, GpsTime, PositionReport, SimulatedPosition};
pub use processing::{ConstantDrift, DriftController, DriftMode, FixComposer, NoiseModel, NoiseParameters, RateScheduler, SteeredDrift};
pub use validation::{SpoofError, SpoofResult};
pub use utils::{ConfigurationManager, SpoofConfig, ValidationResult};
pub use link::{ControlSource, FixSink, HeldControl, LinkError, LinkResult, MockSink, RecoveryStrategy, WriterSink};
pub use api::{
    Command, CommandProcessor, SessionState, SessionStatus, SpoofingSession,
    OutputFormat, TextFormatter, JsonFormatter, CsvFormatter,
};
