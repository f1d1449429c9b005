//! Spoofing session: idle/active state machine driven once per tick
//!
//! The session owns every piece of mutable state (simulated position, drift
//! accumulator, scheduler memory). It never loops or blocks; the caller
//! invokes [`SpoofingSession::on_tick`] from its own polling loop and hands
//! any returned fix to a transport.

use crate::core::{ControlInput, DriftState, FixRecord, PositionReport, SimulatedPosition};
use crate::processing::{DriftController, DriftMode, FixComposer, NoiseModel, RateScheduler};
use crate::utils::config::SpoofConfig;
use crate::validation::error::{parse_f64, SpoofError, SpoofResult};
use rand::Rng;
use std::fmt;
use tracing::{debug, info, trace};

/// Spoofing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Fixes are emitted from a stationary position
    Idle,
    /// Drift advances on every emitted fix
    Active,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Active => write!(f, "active"),
        }
    }
}

/// Snapshot of the session for status reporting
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub state: SessionState,
    pub mode: DriftMode,
    pub position: SimulatedPosition,
    pub drift_offset: DriftState,
    pub rate_hz: f64,
    pub fixes_emitted: u64,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spoofing {} ({} drift) | pos {:.7}, {:.7}, {:.1}m | offset {:.7}, {:.7} | {} Hz | {} fixes sent",
            self.state,
            self.mode,
            self.position.latitude,
            self.position.longitude,
            self.position.altitude,
            self.drift_offset.latitude,
            self.drift_offset.longitude,
            self.rate_hz,
            self.fixes_emitted
        )
    }
}

/// Fake GPS generator with optional spoofing drift
pub struct SpoofingSession {
    config: SpoofConfig,
    position: SimulatedPosition,
    position_changed_at: f64,
    last_tick: Option<f64>,
    drift: DriftController,
    noise: NoiseModel,
    composer: FixComposer,
    scheduler: RateScheduler,
    state: SessionState,
    fixes_emitted: u64,
}

impl SpoofingSession {
    /// Create an idle session; malformed configuration is rejected here
    pub fn new(config: SpoofConfig) -> SpoofResult<Self> {
        config.check()?;

        Ok(Self {
            position: config.home_position(),
            position_changed_at: 0.0,
            last_tick: None,
            drift: build_drift(&config),
            noise: NoiseModel::new(config.noise_parameters()),
            composer: FixComposer::new(config.num_satellites, config.yaw),
            scheduler: RateScheduler::new(config.rate_hz),
            state: SessionState::Idle,
            fixes_emitted: 0,
            config,
        })
    }

    /// Begin drifting. No-op when already active.
    pub fn start(&mut self) -> bool {
        if self.state == SessionState::Active {
            return false;
        }
        self.state = SessionState::Active;
        info!(mode = %self.drift.mode(), "GPS spoofing started");
        true
    }

    /// Freeze drift; the accumulated offset is kept. No-op when idle.
    pub fn stop(&mut self) -> bool {
        if self.state == SessionState::Idle {
            return false;
        }
        self.state = SessionState::Idle;
        info!("GPS spoofing stopped");
        true
    }

    /// Return to idle at the configured home position with no drift
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.drift.reset();
        self.scheduler.reset();
        self.position = self.config.home_position();
        self.position_changed_at = self.last_tick.unwrap_or(0.0);
        info!("session reset to home position");
    }

    /// Process one tick at `now` (seconds since Unix epoch).
    ///
    /// Returns `None` when the rate limiter suppresses this tick; in that
    /// case nothing changes. Otherwise the fix is composed from the current
    /// position, then drift advances if spoofing is active.
    pub fn on_tick(&mut self, now: f64, control: Option<ControlInput>) -> Option<FixRecord> {
        self.on_tick_with(now, control, &mut rand::thread_rng())
    }

    /// [`on_tick`](Self::on_tick) drawing noise from the given generator
    pub fn on_tick_with<R: Rng>(
        &mut self,
        now: f64,
        control: Option<ControlInput>,
        rng: &mut R,
    ) -> Option<FixRecord> {
        if !self.scheduler.should_emit(now) {
            trace!(now, "tick suppressed by rate limiter");
            return None;
        }
        self.last_tick = Some(now);

        let noise = self.noise.sample_with(rng);
        let fix = self.composer.compose(&self.position, &self.drift.offset(), &noise, now);

        if self.state == SessionState::Active {
            let delta = self.drift.advance(control);
            if let DriftController::Steered(_) = self.drift {
                self.position.offset_by(delta);
                self.position_changed_at = now;
            }
        }

        self.fixes_emitted += 1;
        debug!(
            lat_e7 = fix.lat_e7,
            lon_e7 = fix.lon_e7,
            alt_m = fix.alt_m,
            state = %self.state,
            "fix composed"
        );
        Some(fix)
    }

    /// Replace the position wholesale.
    ///
    /// The optional altitude is parsed from text; on any error the position
    /// is left unchanged.
    pub fn set_position(&mut self, lat: f64, lon: f64, alt: Option<&str>) -> SpoofResult<SimulatedPosition> {
        let altitude = match alt {
            Some(text) => parse_f64("altitude", text)?,
            None => self.position.altitude,
        };
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(SpoofError::invalid("lat", lat, "latitude must be within [-90, 90]"));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(SpoofError::invalid("lon", lon, "longitude must be within [-180, 180]"));
        }

        self.position = SimulatedPosition::new(lat, lon, altitude);
        self.position_changed_at = self.last_tick.unwrap_or(0.0);
        info!(lat, lon, alt = altitude, "simulated position set");
        Ok(self.position)
    }

    /// Replace the position from an external fix such as a map click
    pub fn set_position_from(
        &mut self,
        source: Option<(f64, f64)>,
        alt: Option<&str>,
    ) -> SpoofResult<SimulatedPosition> {
        let (lat, lon) = source.ok_or(SpoofError::MissingPositionSource)?;
        self.set_position(lat, lon, alt)
    }

    /// Change one option at runtime, returning its previous value
    pub fn set_option(&mut self, name: &str, value: &str) -> SpoofResult<String> {
        let mut updated = self.config.clone();
        let old_value = updated.set_option(name, value)?;
        self.apply_config(updated)?;
        Ok(old_value)
    }

    /// Apply a new configuration, touching only what changed
    pub fn apply_config(&mut self, config: SpoofConfig) -> SpoofResult<()> {
        config.check()?;
        let old = std::mem::replace(&mut self.config, config);
        let new = &self.config;

        if new.lat != old.lat {
            self.position.latitude = new.lat;
        }
        if new.lon != old.lon {
            self.position.longitude = new.lon;
        }
        if new.alt != old.alt {
            self.position.altitude = new.alt;
        }
        if new.rate_hz != old.rate_hz {
            self.scheduler.set_rate(new.rate_hz);
        }
        if new.noise_parameters() != old.noise_parameters() {
            self.noise = NoiseModel::new(new.noise_parameters());
        }
        self.composer.num_satellites = new.num_satellites;
        self.composer.yaw_deg = new.yaw;

        let rebuild = new.drift_mode != old.drift_mode
            || (new.drift_mode == DriftMode::Steered
                && (new.steer_step != old.steer_step || new.deadzone != old.deadzone));
        if rebuild {
            self.drift = build_drift(new);
        } else if new.constant_step() != old.constant_step() {
            if let DriftController::Constant(drift) = &mut self.drift {
                drift.set_step(new.constant_step());
            }
        }
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Current simulated position, without drift or noise
    pub fn position(&self) -> SimulatedPosition {
        self.position
    }

    /// Current (lat, lon, alt) for other components
    pub fn location(&self) -> (f64, f64, f64) {
        (self.position.latitude, self.position.longitude, self.position.altitude)
    }

    /// Position with the time it last changed
    pub fn report(&self) -> PositionReport {
        PositionReport {
            position: self.position,
            timestamp: self.position_changed_at,
        }
    }

    /// Offset added at composition time (constant drift only)
    pub fn drift_offset(&self) -> DriftState {
        self.drift.offset()
    }

    pub fn drift_mode(&self) -> DriftMode {
        self.drift.mode()
    }

    pub fn config(&self) -> &SpoofConfig {
        &self.config
    }

    pub fn fixes_emitted(&self) -> u64 {
        self.fixes_emitted
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state,
            mode: self.drift.mode(),
            position: self.position,
            drift_offset: self.drift.offset(),
            rate_hz: self.scheduler.rate_hz(),
            fixes_emitted: self.fixes_emitted,
        }
    }
}

fn build_drift(config: &SpoofConfig) -> DriftController {
    match config.drift_mode {
        DriftMode::Constant => DriftController::constant(config.constant_step()),
        DriftMode::Steered => DriftController::steered(config.steer_step, config.deadzone),
    }
}
