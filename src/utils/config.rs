use crate::core::{
    DEFAULT_ALTITUDE_M, DEFAULT_DEADZONE, DEFAULT_DRIFT_STEP_DEG, DEFAULT_LATITUDE,
    DEFAULT_LONGITUDE, DEFAULT_NUM_SATELLITES, DEFAULT_POSITION_NOISE_M, DEFAULT_RATE_HZ,
    DEFAULT_STEER_STEP_DEG, DEFAULT_VELOCITY_NOISE_MPS, DEFAULT_YAW_DEG, DriftDelta,
    MAX_POSITION_NOISE_M, MAX_VELOCITY_NOISE_MPS, SimulatedPosition,
};
use crate::processing::{DriftMode, NoiseParameters};
use crate::validation::error::{parse_f64, SpoofError, SpoofResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fake GPS configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoofConfig {
    /// Number of satellites reported in each fix
    pub num_satellites: u8,
    /// Home latitude in decimal degrees
    pub lat: f64,
    /// Home longitude in decimal degrees
    pub lon: f64,
    /// Home altitude (meters)
    pub alt: f64,
    /// Reported heading (degrees, 0 = not available)
    pub yaw: f64,
    /// Emission rate (Hz), 0 disables output
    pub rate_hz: f64,
    /// Velocity noise bound per axis (m/s)
    pub velocity_noise_mps: f64,
    /// Position noise bound (meters)
    pub position_noise_m: f64,
    /// Constant drift step per tick (degrees)
    pub drift_step: f64,
    /// Latitude step overriding `drift_step` (degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_step_lat: Option<f64>,
    /// Longitude step overriding `drift_step` (degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_step_lon: Option<f64>,
    /// Steered drift per tick at full deflection (degrees)
    pub steer_step: f64,
    /// Control input deadzone
    pub deadzone: f64,
    /// Drift variant
    pub drift_mode: DriftMode,
}

impl Default for SpoofConfig {
    fn default() -> Self {
        Self {
            num_satellites: DEFAULT_NUM_SATELLITES,
            lat: DEFAULT_LATITUDE,
            lon: DEFAULT_LONGITUDE,
            alt: DEFAULT_ALTITUDE_M,
            yaw: DEFAULT_YAW_DEG,
            rate_hz: DEFAULT_RATE_HZ,
            velocity_noise_mps: DEFAULT_VELOCITY_NOISE_MPS,
            position_noise_m: DEFAULT_POSITION_NOISE_M,
            drift_step: DEFAULT_DRIFT_STEP_DEG,
            drift_step_lat: None,
            drift_step_lon: None,
            steer_step: DEFAULT_STEER_STEP_DEG,
            deadzone: DEFAULT_DEADZONE,
            drift_mode: DriftMode::Constant,
        }
    }
}

/// Canonical option names with the short aliases accepted by `set`
const OPTIONS: &[(&str, &[&str])] = &[
    ("num_satellites", &["nsats"]),
    ("lat", &["latitude"]),
    ("lon", &["longitude"]),
    ("alt", &["altitude"]),
    ("yaw", &[]),
    ("rate_hz", &["rate"]),
    ("velocity_noise_mps", &["velocity_noise"]),
    ("position_noise_m", &["position_noise"]),
    ("drift_step", &["spoof_step"]),
    ("drift_step_lat", &["spoof_step_lat"]),
    ("drift_step_lon", &["spoof_step_lon"]),
    ("steer_step", &[]),
    ("deadzone", &[]),
    ("drift_mode", &["mode"]),
];

/// Resolve an option name or alias to its canonical name
pub fn canonical_option(name: &str) -> Option<&'static str> {
    let name = name.trim().to_ascii_lowercase();
    OPTIONS
        .iter()
        .find(|(canonical, aliases)| *canonical == name || aliases.contains(&name.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Configuration validation result
#[derive(Debug)]
pub struct ValidationResult {
    /// Whether configuration is valid
    pub is_valid: bool,
    /// Validation errors
    pub errors: Vec<SpoofError>,
    /// Validation warnings
    pub warnings: Vec<String>,
}

impl SpoofConfig {
    /// Home position described by `lat`/`lon`/`alt`
    pub fn home_position(&self) -> SimulatedPosition {
        SimulatedPosition::new(self.lat, self.lon, self.alt)
    }

    /// Per-tick constant drift step, per-axis overrides applied
    pub fn constant_step(&self) -> DriftDelta {
        DriftDelta::new(
            self.drift_step_lat.unwrap_or(self.drift_step),
            self.drift_step_lon.unwrap_or(self.drift_step),
            0.0,
        )
    }

    pub fn noise_parameters(&self) -> NoiseParameters {
        NoiseParameters {
            position_noise_m: self.position_noise_m,
            velocity_noise_mps: self.velocity_noise_mps,
        }
    }

    /// Check every parameter, collecting all problems
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        check_bound(&mut errors, "position_noise_m", self.position_noise_m, MAX_POSITION_NOISE_M);
        check_bound(&mut errors, "velocity_noise_mps", self.velocity_noise_mps, MAX_VELOCITY_NOISE_MPS);
        check_bound(&mut errors, "rate_hz", self.rate_hz, f64::MAX);

        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            errors.push(SpoofError::invalid("lat", self.lat, "latitude must be within [-90, 90]"));
        }
        if !self.lon.is_finite() || self.lon < -180.0 || self.lon > 180.0 {
            errors.push(SpoofError::invalid("lon", self.lon, "longitude must be within [-180, 180]"));
        }
        if !self.alt.is_finite() {
            errors.push(SpoofError::invalid("alt", self.alt, "altitude must be finite"));
        }
        if !self.yaw.is_finite() || self.yaw < 0.0 || self.yaw >= 360.0 {
            errors.push(SpoofError::invalid("yaw", self.yaw, "yaw must be within [0, 360)"));
        }
        if !self.drift_step.is_finite() {
            errors.push(SpoofError::invalid("drift_step", self.drift_step, "step must be finite"));
        }
        for (name, step) in [("drift_step_lat", self.drift_step_lat), ("drift_step_lon", self.drift_step_lon)] {
            if let Some(step) = step.filter(|s| !s.is_finite()) {
                errors.push(SpoofError::invalid(name, step, "step must be finite"));
            }
        }
        if !self.steer_step.is_finite() {
            errors.push(SpoofError::invalid("steer_step", self.steer_step, "step must be finite"));
        }
        if !self.deadzone.is_finite() || self.deadzone < 0.0 || self.deadzone >= 1.0 {
            errors.push(SpoofError::invalid("deadzone", self.deadzone, "deadzone must be within [0, 1)"));
        }

        if self.rate_hz == 0.0 {
            warnings.push("rate_hz is 0, no fixes will be emitted".to_string());
        } else if self.rate_hz > 50.0 {
            warnings.push(format!("rate_hz {} exceeds what most autopilots fuse", self.rate_hz));
        }
        if self.num_satellites < 6 {
            warnings.push(format!(
                "{} satellites may be rejected by the autopilot's GPS checks",
                self.num_satellites
            ));
        }
        if self.position_noise_m > 10.0 {
            warnings.push(format!("position noise of {} m is unusually large", self.position_noise_m));
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Validate, returning the first error if any
    pub fn check(&self) -> SpoofResult<()> {
        match self.validate().errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Current value of an option rendered as text
    pub fn option_value(&self, name: &str) -> SpoofResult<String> {
        let canonical = canonical_option(name).ok_or_else(|| SpoofError::UnknownOption {
            option: name.to_string(),
        })?;

        Ok(match canonical {
            "num_satellites" => self.num_satellites.to_string(),
            "lat" => self.lat.to_string(),
            "lon" => self.lon.to_string(),
            "alt" => self.alt.to_string(),
            "yaw" => self.yaw.to_string(),
            "rate_hz" => self.rate_hz.to_string(),
            "velocity_noise_mps" => self.velocity_noise_mps.to_string(),
            "position_noise_m" => self.position_noise_m.to_string(),
            "drift_step" => self.drift_step.to_string(),
            "drift_step_lat" => self.constant_step().latitude.to_string(),
            "drift_step_lon" => self.constant_step().longitude.to_string(),
            "steer_step" => self.steer_step.to_string(),
            "deadzone" => self.deadzone.to_string(),
            _ => self.drift_mode.to_string(),
        })
    }

    /// Set one option from text.
    ///
    /// Returns the previous value. On any error the configuration is left
    /// untouched.
    pub fn set_option(&mut self, name: &str, value: &str) -> SpoofResult<String> {
        let canonical = canonical_option(name).ok_or_else(|| SpoofError::UnknownOption {
            option: name.to_string(),
        })?;
        let old_value = self.option_value(canonical)?;

        let mut updated = self.clone();
        match canonical {
            "num_satellites" => {
                let count = parse_f64(canonical, value)?;
                if count.fract() != 0.0 || !(0.0..=255.0).contains(&count) {
                    return Err(SpoofError::invalid(
                        canonical,
                        value,
                        "satellite count must be a whole number within [0, 255]",
                    ));
                }
                updated.num_satellites = count as u8;
            }
            "lat" => updated.lat = parse_f64(canonical, value)?,
            "lon" => updated.lon = parse_f64(canonical, value)?,
            "alt" => updated.alt = parse_f64(canonical, value)?,
            "yaw" => updated.yaw = parse_f64(canonical, value)?,
            "rate_hz" => updated.rate_hz = parse_f64(canonical, value)?,
            "velocity_noise_mps" => updated.velocity_noise_mps = parse_f64(canonical, value)?,
            "position_noise_m" => updated.position_noise_m = parse_f64(canonical, value)?,
            "drift_step" => updated.drift_step = parse_f64(canonical, value)?,
            "drift_step_lat" => updated.drift_step_lat = parse_axis_step(canonical, value)?,
            "drift_step_lon" => updated.drift_step_lon = parse_axis_step(canonical, value)?,
            "steer_step" => updated.steer_step = parse_f64(canonical, value)?,
            "deadzone" => updated.deadzone = parse_f64(canonical, value)?,
            _ => {
                updated.drift_mode = value
                    .parse()
                    .map_err(|reason: String| SpoofError::invalid(canonical, value, &reason))?;
            }
        }

        updated.check()?;
        *self = updated;
        Ok(old_value)
    }

    /// All options as (name, value) pairs in display order
    pub fn list_options(&self) -> Vec<(&'static str, String)> {
        OPTIONS
            .iter()
            .filter_map(|(name, _)| self.option_value(name).ok().map(|value| (*name, value)))
            .collect()
    }
}

fn check_bound(errors: &mut Vec<SpoofError>, parameter: &str, value: f64, max: f64) {
    if !value.is_finite() {
        errors.push(SpoofError::invalid(parameter, value, "must be finite"));
    } else if value < 0.0 {
        errors.push(SpoofError::invalid(parameter, value, "must not be negative"));
    } else if value > max {
        errors.push(SpoofError::invalid(parameter, value, &format!("must not exceed {}", max)));
    }
}

/// Per-axis step; `default` falls back to the shared `drift_step`
fn parse_axis_step(argument: &str, value: &str) -> SpoofResult<Option<f64>> {
    if value.trim().eq_ignore_ascii_case("default") {
        Ok(None)
    } else {
        parse_f64(argument, value).map(Some)
    }
}

/// Loads, saves and tracks changes to a [`SpoofConfig`]
pub struct ConfigurationManager {
    /// Current configuration
    config: SpoofConfig,
    /// Configuration file path
    config_file_path: Option<String>,
    /// Whether configuration has been modified
    is_modified: bool,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationManager {
    /// Create a new configuration manager with default settings
    pub fn new() -> Self {
        Self {
            config: SpoofConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SpoofResult<Self> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &SpoofConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: SpoofConfig) -> SpoofResult<()> {
        config.check()?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Set one option from text, returning the previous value
    pub fn set_option(&mut self, name: &str, value: &str) -> SpoofResult<String> {
        let old_value = self.config.set_option(name, value)?;
        self.is_modified = true;
        Ok(old_value)
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> SpoofResult<()> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| SpoofError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: SpoofConfig = serde_json::from_str(&content).map_err(|e| {
            SpoofError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            }
        })?;

        // Validate before applying
        config.check()?;

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> SpoofResult<()> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| {
            SpoofError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            }
        })?;

        fs::write(&path, content).map_err(|e| SpoofError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> SpoofResult<()> {
        if let Some(path) = self.config_file_path.clone() {
            self.save_to_file(path)
        } else {
            Err(SpoofError::IoError {
                message: "No file path set for saving configuration".to_string(),
            })
        }
    }

    /// Check if configuration has been modified since last save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn into_config(self) -> SpoofConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fakegps_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = SpoofConfig::default();
        assert_eq!(config.num_satellites, 16);
        assert_eq!(config.lat, -35.363261);
        assert_eq!(config.lon, 149.165230);
        assert_eq!(config.alt, 584.0);
        assert_eq!(config.yaw, 0.0);
        assert_eq!(config.rate_hz, 10.0);
        assert_eq!(config.velocity_noise_mps, 0.1);
        assert_eq!(config.position_noise_m, 0.5);
        assert_eq!(config.drift_step, 0.00001);
        assert_eq!(config.drift_mode, DriftMode::Constant);
        assert!(config.validate().is_valid);
    }

    #[test]
    fn test_negative_noise_rejected() {
        let config = SpoofConfig {
            position_noise_m: -0.5,
            velocity_noise_mps: -1.0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert!(matches!(
            config.check(),
            Err(SpoofError::ConfigurationError { ref parameter, .. }) if parameter == "position_noise_m"
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let config = SpoofConfig { rate_hz: -1.0, ..Default::default() };
        assert!(config.check().is_err());

        let disabled = SpoofConfig { rate_hz: 0.0, ..Default::default() };
        let result = disabled.validate();
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_oversized_noise_rejected() {
        let config = SpoofConfig { position_noise_m: 1e308, ..Default::default() };
        assert!(matches!(
            config.check(),
            Err(SpoofError::ConfigurationError { ref parameter, .. }) if parameter == "position_noise_m"
        ));

        let mut config = SpoofConfig::default();
        assert!(matches!(
            config.set_option("velocity_noise", "1e308"),
            Err(SpoofError::ConfigurationError { .. })
        ));
        assert!(config.set_option("position_noise", "1e308").is_err());
        assert_eq!(config, SpoofConfig::default());

        config.set_option("position_noise", "10000").unwrap();
        assert!(config.validate().is_valid);
    }

    #[test]
    fn test_per_axis_drift_steps() {
        let mut config = SpoofConfig::default();
        assert_eq!(config.constant_step(), DriftDelta::new(0.00001, 0.00001, 0.0));

        config.set_option("spoof_step_lat", "0").unwrap();
        config.set_option("drift_step_lon", "0.000008").unwrap();
        assert_eq!(config.constant_step(), DriftDelta::new(0.0, 0.000008, 0.0));
        assert_eq!(config.option_value("drift_step_lat"), Ok("0".to_string()));

        // Shared step no longer reaches the overridden axes
        config.set_option("drift_step", "0.5").unwrap();
        assert_eq!(config.constant_step(), DriftDelta::new(0.0, 0.000008, 0.0));

        config.set_option("drift_step_lat", "default").unwrap();
        assert_eq!(config.drift_step_lat, None);
        assert_eq!(config.constant_step().latitude, 0.5);

        assert!(config.set_option("drift_step_lon", "inf").is_err());
    }

    #[test]
    fn test_set_option_with_aliases() {
        let mut config = SpoofConfig::default();
        assert_eq!(config.set_option("nsats", "10"), Ok("16".to_string()));
        assert_eq!(config.num_satellites, 10);
        assert_eq!(config.set_option("rate", "5"), Ok("10".to_string()));
        assert_eq!(config.rate_hz, 5.0);
        config.set_option("spoof_step", "0.0001").unwrap();
        assert_eq!(config.drift_step, 0.0001);
        config.set_option("mode", "steered").unwrap();
        assert_eq!(config.drift_mode, DriftMode::Steered);
    }

    #[test]
    fn test_set_option_rejections_leave_config_unchanged() {
        let mut config = SpoofConfig::default();

        let err = config.set_option("position_noise", "-2").unwrap_err();
        assert!(matches!(err, SpoofError::ConfigurationError { .. }));

        let err = config.set_option("alt", "abc").unwrap_err();
        assert!(matches!(err, SpoofError::InputParseError { .. }));

        let err = config.set_option("warp", "9").unwrap_err();
        assert_eq!(err, SpoofError::UnknownOption { option: "warp".to_string() });

        assert!(config.set_option("nsats", "300").is_err());
        assert!(config.set_option("nsats", "4.5").is_err());
        assert!(config.set_option("lat", "91").is_err());
        assert!(config.set_option("mode", "sideways").is_err());

        assert_eq!(config, SpoofConfig::default());
    }

    #[test]
    fn test_list_options() {
        let config = SpoofConfig::default();
        let options = config.list_options();
        assert_eq!(options.len(), 14);
        assert_eq!(options[0], ("num_satellites", "16".to_string()));
        assert!(options.contains(&("drift_mode", "constant".to_string())));
    }

    #[test]
    fn test_config_serialization() {
        let mut manager = ConfigurationManager::new();
        manager.set_option("alt", "100").unwrap();
        manager.set_option("mode", "steered").unwrap();
        assert!(manager.is_modified());

        let temp_path = temp_path("roundtrip");
        manager.save_to_file(&temp_path).unwrap();
        assert!(!manager.is_modified());

        let loaded = ConfigurationManager::from_file(&temp_path).unwrap();
        assert_eq!(loaded.get_config().alt, 100.0);
        assert_eq!(loaded.get_config().drift_mode, DriftMode::Steered);

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_per_axis_steps_from_json() {
        let config: SpoofConfig =
            serde_json::from_str(r#"{"drift_step_lat": 0.0, "drift_step_lon": 0.000008}"#).unwrap();
        assert_eq!(config.constant_step(), DriftDelta::new(0.0, 0.000008, 0.0));

        let json = serde_json::to_string(&SpoofConfig::default()).unwrap();
        assert!(!json.contains("drift_step_lat"));
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let temp_path = temp_path("partial");
        fs::write(&temp_path, r#"{ "rate_hz": 5.0, "drift_mode": "steered" }"#).unwrap();

        let manager = ConfigurationManager::from_file(&temp_path).unwrap();
        assert_eq!(manager.get_config().rate_hz, 5.0);
        assert_eq!(manager.get_config().num_satellites, 16);
        assert_eq!(manager.get_config().drift_mode, DriftMode::Steered);

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_invalid_config_file_rejected() {
        let temp_path = temp_path("invalid");
        fs::write(&temp_path, r#"{ "position_noise_m": -1.0 }"#).unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(&temp_path),
            Err(SpoofError::ConfigurationError { .. })
        ));

        fs::write(&temp_path, "not json").unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(&temp_path),
            Err(SpoofError::SerializationError { .. })
        ));

        let _ = fs::remove_file(temp_path);
        assert!(matches!(
            ConfigurationManager::from_file("/nonexistent/fakegps.json"),
            Err(SpoofError::IoError { .. })
        ));
    }

    #[test]
    fn test_save_without_path() {
        let mut manager = ConfigurationManager::new();
        assert!(manager.save().is_err());
    }
}
