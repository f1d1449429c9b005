//! Core data types for the fake GPS generator

use serde::{Deserialize, Serialize};

/// Simulated ground-truth position in geodetic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedPosition {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Altitude above mean sea level (meters)
    pub altitude: f64,
}

impl SimulatedPosition {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }

    /// Shift the position by a latitude/longitude delta in degrees
    pub fn offset_by(&mut self, delta: DriftDelta) {
        self.latitude += delta.latitude;
        self.longitude += delta.longitude;
        self.altitude += delta.altitude;
    }
}

/// Position offset produced by the drift controller.
///
/// Latitude/longitude in degrees, altitude in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftDelta {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl DriftDelta {
    pub const ZERO: DriftDelta = DriftDelta { latitude: 0.0, longitude: 0.0, altitude: 0.0 };

    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }
}

/// Accumulated constant-drift offset
pub type DriftState = DriftDelta;

/// Two-axis control input in [-1, 1], e.g. a joystick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    pub axis_x: f64,
    pub axis_y: f64,
}

impl ControlInput {
    /// Build an input, clamping each axis into [-1, 1]
    pub fn new(axis_x: f64, axis_y: f64) -> Self {
        Self {
            axis_x: clamp_axis(axis_x),
            axis_y: clamp_axis(axis_y),
        }
    }

    /// Zero any axis whose magnitude falls below the deadzone
    pub fn with_deadzone(self, deadzone: f64) -> Self {
        let filter = |v: f64| if v.abs() < deadzone { 0.0 } else { v };
        Self {
            axis_x: filter(self.axis_x),
            axis_y: filter(self.axis_y),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.axis_x == 0.0 && self.axis_y == 0.0
    }
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// GNSS fix type carried in the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixType {
    NoFix,
    Fix2D,
    Fix3D,
}

impl FixType {
    /// Numeric code used on the wire
    pub fn code(self) -> u8 {
        match self {
            FixType::NoFix => 1,
            FixType::Fix2D => 2,
            FixType::Fix3D => crate::core::FIX_TYPE_3D,
        }
    }
}

/// A single fabricated GPS input record.
///
/// Field layout mirrors the autopilot's GPS_INPUT message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixRecord {
    /// Wall-clock timestamp (microseconds since Unix epoch)
    pub timestamp_us: u64,
    pub gps_id: u8,
    pub ignore_flags: u16,
    pub gps_week: u16,
    pub gps_week_ms: u32,
    pub fix_type: FixType,
    /// Latitude, degrees * 1e7, truncated
    pub lat_e7: i32,
    /// Longitude, degrees * 1e7, truncated
    pub lon_e7: i32,
    pub alt_m: f32,
    pub hdop: f32,
    pub vdop: f32,
    /// North-East-Down velocity (m/s)
    pub velocity_ned: [f32; 3],
    pub speed_accuracy: f32,
    pub horizontal_accuracy: f32,
    pub vertical_accuracy: f32,
    pub num_satellites: u8,
    /// Yaw in centidegrees, 0 when unavailable
    pub yaw_cdeg: u16,
}

impl FixRecord {
    /// Latitude in decimal degrees as seen by the receiver
    pub fn latitude_deg(&self) -> f64 {
        self.lat_e7 as f64 / crate::core::DEG_TO_E7
    }

    /// Longitude in decimal degrees as seen by the receiver
    pub fn longitude_deg(&self) -> f64 {
        self.lon_e7 as f64 / crate::core::DEG_TO_E7
    }

    /// Horizontal ground speed (m/s)
    pub fn ground_speed(&self) -> f32 {
        let [vn, ve, _] = self.velocity_ned;
        (vn * vn + ve * ve).sqrt()
    }
}

/// Location published to other components after each update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub position: SimulatedPosition,
    /// Time of the last change (seconds since Unix epoch)
    pub timestamp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_input_clamped() {
        let input = ControlInput::new(1.7, -3.0);
        assert_eq!(input.axis_x, 1.0);
        assert_eq!(input.axis_y, -1.0);

        let nan = ControlInput::new(f64::NAN, 0.5);
        assert_eq!(nan.axis_x, 0.0);
        assert_eq!(nan.axis_y, 0.5);
    }

    #[test]
    fn test_deadzone_filter() {
        let input = ControlInput::new(0.05, -0.09).with_deadzone(0.1);
        assert!(input.is_neutral());

        let input = ControlInput::new(0.1, -0.5).with_deadzone(0.1);
        assert_eq!(input.axis_x, 0.1);
        assert_eq!(input.axis_y, -0.5);
    }

    #[test]
    fn test_position_offset() {
        let mut pos = SimulatedPosition::new(10.0, 20.0, 100.0);
        pos.offset_by(DriftDelta::new(0.5, -0.25, 0.0));
        assert_eq!(pos, SimulatedPosition::new(10.5, 19.75, 100.0));
    }

    #[test]
    fn test_fix_type_code() {
        assert_eq!(FixType::Fix3D.code(), 3);
        assert_eq!(FixType::Fix2D.code(), 2);
    }
}
