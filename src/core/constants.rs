//! Physical constants and system parameters

/// Scale between decimal degrees and the integer degE7 wire representation
pub const DEG_TO_E7: f64 = 1e7;

/// Degrees of position noise per configured meter of position noise
pub const NOISE_DEG_PER_METER: f64 = 1e-7;

/// Fix type reported in every record (3D fix)
pub const FIX_TYPE_3D: u8 = 3;

/// Fixed horizontal dilution of precision
pub const HDOP: f32 = 0.3;
/// Fixed vertical dilution of precision
pub const VDOP: f32 = 0.4;
/// Fixed speed accuracy (m/s)
pub const SPEED_ACCURACY_MPS: f32 = 0.2;
/// Fixed horizontal accuracy (m)
pub const HORIZONTAL_ACCURACY_M: f32 = 1.0;
/// Fixed vertical accuracy (m)
pub const VERTICAL_ACCURACY_M: f32 = 1.0;

/// Control axis magnitudes below this are treated as zero
pub const DEFAULT_DEADZONE: f64 = 0.1;

pub const DEFAULT_NUM_SATELLITES: u8 = 16;
pub const DEFAULT_LATITUDE: f64 = -35.363261;
pub const DEFAULT_LONGITUDE: f64 = 149.165230;
pub const DEFAULT_ALTITUDE_M: f64 = 584.0;
pub const DEFAULT_YAW_DEG: f64 = 0.0;
/// 10Hz keeps the autopilot EKF fed without flooding the link
pub const DEFAULT_RATE_HZ: f64 = 10.0;
pub const DEFAULT_VELOCITY_NOISE_MPS: f64 = 0.1;
pub const DEFAULT_POSITION_NOISE_M: f64 = 0.5;
/// Largest accepted position noise bound (meters)
pub const MAX_POSITION_NOISE_M: f64 = 10_000.0;
/// Largest accepted velocity noise bound (m/s)
pub const MAX_VELOCITY_NOISE_MPS: f64 = 1_000.0;
/// Per-tick constant drift step (degrees)
pub const DEFAULT_DRIFT_STEP_DEG: f64 = 0.00001;
/// Per-tick steered drift at full stick deflection (degrees)
pub const DEFAULT_STEER_STEP_DEG: f64 = 0.0000005;

/// Unix time of the GPS epoch (1980-01-06T00:00:00Z)
pub const GPS_EPOCH_UNIX_S: i64 = 315_964_800;
/// GPS-UTC offset in seconds
pub const GPS_LEAP_SECONDS: i64 = 18;
pub const SECONDS_PER_WEEK: i64 = 7 * 86_400;
/// Granularity of the sub-second part of the week time
pub const WEEK_MS_GRANULARITY: i64 = 200;
