//! Spoofing drift: constant-rate offset or operator-steered displacement

use crate::core::{ControlInput, DriftDelta, DriftState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which drift variant a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftMode {
    /// Fixed per-tick step accumulated into a separate offset
    Constant,
    /// Per-tick delta from a two-axis control input, applied to the position
    Steered,
}

impl fmt::Display for DriftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftMode::Constant => write!(f, "constant"),
            DriftMode::Steered => write!(f, "steered"),
        }
    }
}

impl FromStr for DriftMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" => Ok(DriftMode::Constant),
            "steered" | "joystick" | "controller" => Ok(DriftMode::Steered),
            other => Err(format!("unknown drift mode '{}'", other)),
        }
    }
}

/// Constant-rate drift.
///
/// The offset is kept as `base + steps * step` so that `n` advances with an
/// unchanged step yield exactly `n * step`. Changing the step folds the
/// current offset into `base`. The offset never decays.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDrift {
    step: DriftDelta,
    base: DriftState,
    steps_since_change: u64,
    total_steps: u64,
}

impl ConstantDrift {
    pub fn new(step: DriftDelta) -> Self {
        Self {
            step,
            base: DriftState::ZERO,
            steps_since_change: 0,
            total_steps: 0,
        }
    }

    /// Same step on latitude and longitude, none on altitude
    pub fn horizontal(step_deg: f64) -> Self {
        Self::new(DriftDelta::new(step_deg, step_deg, 0.0))
    }

    /// Add one step and return the new accumulated offset
    pub fn advance(&mut self) -> DriftState {
        self.steps_since_change += 1;
        self.total_steps += 1;
        self.accumulated()
    }

    pub fn accumulated(&self) -> DriftState {
        let n = self.steps_since_change as f64;
        DriftState::new(
            self.base.latitude + n * self.step.latitude,
            self.base.longitude + n * self.step.longitude,
            self.base.altitude + n * self.step.altitude,
        )
    }

    pub fn step(&self) -> DriftDelta {
        self.step
    }

    /// Change the per-tick step without disturbing the offset so far
    pub fn set_step(&mut self, step: DriftDelta) {
        self.base = self.accumulated();
        self.steps_since_change = 0;
        self.step = step;
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn reset(&mut self) {
        self.base = DriftState::ZERO;
        self.steps_since_change = 0;
        self.total_steps = 0;
    }
}

/// Operator-steered drift from a joystick-style input.
///
/// Stick x moves longitude; stick y moves latitude with the sign inverted,
/// since pushing the stick forward reads negative on y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeredDrift {
    /// Degrees moved per tick at full deflection
    pub step_deg: f64,
    pub deadzone: f64,
}

impl SteeredDrift {
    pub fn new(step_deg: f64, deadzone: f64) -> Self {
        Self { step_deg, deadzone }
    }

    /// One-shot delta for this tick; a missing input counts as neutral
    pub fn advance(&self, input: Option<ControlInput>) -> DriftDelta {
        let input = input.unwrap_or_default().with_deadzone(self.deadzone);
        DriftDelta::new(
            -input.axis_y * self.step_deg,
            input.axis_x * self.step_deg,
            0.0,
        )
    }
}

/// Drift variant selected at configuration time
#[derive(Debug, Clone, PartialEq)]
pub enum DriftController {
    Constant(ConstantDrift),
    Steered(SteeredDrift),
}

impl DriftController {
    pub fn constant(step: DriftDelta) -> Self {
        DriftController::Constant(ConstantDrift::new(step))
    }

    pub fn steered(step_deg: f64, deadzone: f64) -> Self {
        DriftController::Steered(SteeredDrift::new(step_deg, deadzone))
    }

    /// Advance one tick.
    ///
    /// Constant drift returns the new accumulated totals; steered drift
    /// returns the delta the caller must add to the base position.
    pub fn advance(&mut self, input: Option<ControlInput>) -> DriftDelta {
        match self {
            DriftController::Constant(drift) => drift.advance(),
            DriftController::Steered(drift) => drift.advance(input),
        }
    }

    /// Offset to add at composition time
    pub fn offset(&self) -> DriftState {
        match self {
            DriftController::Constant(drift) => drift.accumulated(),
            DriftController::Steered(_) => DriftState::ZERO,
        }
    }

    pub fn mode(&self) -> DriftMode {
        match self {
            DriftController::Constant(_) => DriftMode::Constant,
            DriftController::Steered(_) => DriftMode::Steered,
        }
    }

    pub fn reset(&mut self) {
        if let DriftController::Constant(drift) = self {
            drift.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_drift_is_exact_multiple() {
        let step = 0.00001;
        let mut drift = ConstantDrift::horizontal(step);
        for _ in 0..250 {
            drift.advance();
        }
        let offset = drift.accumulated();
        assert_eq!(offset.latitude, 250.0 * step);
        assert_eq!(offset.longitude, 250.0 * step);
        assert_eq!(offset.altitude, 0.0);
        assert_eq!(drift.total_steps(), 250);
    }

    #[test]
    fn test_constant_drift_returns_running_total() {
        let mut drift = DriftController::constant(DriftDelta::new(0.5, 0.5, 0.0));
        assert_eq!(drift.advance(None), DriftDelta::new(0.5, 0.5, 0.0));
        assert_eq!(drift.advance(None), DriftDelta::new(1.0, 1.0, 0.0));
        assert_eq!(drift.offset(), DriftDelta::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_constant_drift_single_axis() {
        let mut drift = ConstantDrift::new(DriftDelta::new(0.0, 0.25, 0.0));
        drift.advance();
        drift.advance();
        assert_eq!(drift.accumulated(), DriftDelta::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_step_change_keeps_offset() {
        let mut drift = ConstantDrift::horizontal(0.5);
        drift.advance();
        drift.advance();
        drift.set_step(DriftDelta::new(0.25, 0.0, 0.0));
        assert_eq!(drift.accumulated(), DriftDelta::new(1.0, 1.0, 0.0));
        drift.advance();
        assert_eq!(drift.accumulated(), DriftDelta::new(1.25, 1.0, 0.0));
        assert_eq!(drift.total_steps(), 3);
    }

    #[test]
    fn test_constant_drift_reset() {
        let mut drift = DriftController::constant(DriftDelta::new(0.5, 0.5, 0.0));
        drift.advance(None);
        drift.reset();
        assert_eq!(drift.offset(), DriftState::ZERO);
    }

    #[test]
    fn test_steered_deadzone() {
        let drift = SteeredDrift::new(0.0000005, 0.1);
        let delta = drift.advance(Some(ControlInput::new(0.09, -0.05)));
        assert_eq!(delta, DriftDelta::ZERO);

        let delta = drift.advance(Some(ControlInput::new(0.5, 0.05)));
        assert_eq!(delta.latitude, 0.0);
        assert_eq!(delta.longitude, 0.5 * 0.0000005);
    }

    #[test]
    fn test_steered_axis_mapping() {
        let drift = SteeredDrift::new(1.0, 0.1);
        // Stick forward reads negative y and moves north
        let delta = drift.advance(Some(ControlInput::new(0.0, -1.0)));
        assert_eq!(delta, DriftDelta::new(1.0, 0.0, 0.0));

        let delta = drift.advance(Some(ControlInput::new(-0.5, 0.5)));
        assert_eq!(delta, DriftDelta::new(-0.5, -0.5, 0.0));
    }

    #[test]
    fn test_steered_without_input_is_neutral() {
        let mut drift = DriftController::steered(1.0, 0.1);
        assert_eq!(drift.advance(None), DriftDelta::ZERO);
        assert_eq!(drift.offset(), DriftState::ZERO);
        assert_eq!(drift.mode(), DriftMode::Steered);
    }

    #[test]
    fn test_drift_mode_parsing() {
        assert_eq!("constant".parse::<DriftMode>(), Ok(DriftMode::Constant));
        assert_eq!("Steered".parse::<DriftMode>(), Ok(DriftMode::Steered));
        assert_eq!("joystick".parse::<DriftMode>(), Ok(DriftMode::Steered));
        assert!("sideways".parse::<DriftMode>().is_err());
        assert_eq!(DriftMode::Steered.to_string(), "steered");
    }
}
