//! Assemble fabricated GPS input records

use crate::core::{
    DriftState, FixRecord, FixType, GpsTime, SimulatedPosition, DEG_TO_E7, HDOP,
    HORIZONTAL_ACCURACY_M, SPEED_ACCURACY_MPS, VDOP, VERTICAL_ACCURACY_M,
};
use crate::processing::noise::FixNoise;
use nalgebra::Vector3;

/// Accuracy figures reported verbatim in every fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyConstants {
    pub hdop: f32,
    pub vdop: f32,
    pub speed_accuracy: f32,
    pub horizontal_accuracy: f32,
    pub vertical_accuracy: f32,
}

impl Default for AccuracyConstants {
    fn default() -> Self {
        Self {
            hdop: HDOP,
            vdop: VDOP,
            speed_accuracy: SPEED_ACCURACY_MPS,
            horizontal_accuracy: HORIZONTAL_ACCURACY_M,
            vertical_accuracy: VERTICAL_ACCURACY_M,
        }
    }
}

/// Combines position, drift and noise into a [`FixRecord`].
///
/// Composition is pure arithmetic. Latitude and longitude are summed as
/// `base + drift + noise` in that order and then truncated to degE7.
#[derive(Debug, Clone, PartialEq)]
pub struct FixComposer {
    pub num_satellites: u8,
    pub yaw_deg: f64,
    /// Vehicle velocity before noise (NED, m/s); zero without telemetry
    pub base_velocity: Vector3<f64>,
    pub accuracy: AccuracyConstants,
}

impl FixComposer {
    pub fn new(num_satellites: u8, yaw_deg: f64) -> Self {
        Self {
            num_satellites,
            yaw_deg,
            base_velocity: Vector3::zeros(),
            accuracy: AccuracyConstants::default(),
        }
    }

    pub fn with_base_velocity(mut self, velocity_ned: Vector3<f64>) -> Self {
        self.base_velocity = velocity_ned;
        self
    }

    /// Build the record for wall-clock time `now_s` (seconds since Unix epoch)
    pub fn compose(
        &self,
        base: &SimulatedPosition,
        drift: &DriftState,
        noise: &FixNoise,
        now_s: f64,
    ) -> FixRecord {
        let lat = base.latitude + drift.latitude + noise.latitude_deg;
        let lon = base.longitude + drift.longitude + noise.longitude_deg;
        let alt = base.altitude + drift.altitude + noise.altitude_m;
        let velocity = self.base_velocity + noise.velocity_mps;
        let gps_time = GpsTime::from_unix_seconds(now_s);

        FixRecord {
            timestamp_us: (now_s * 1e6) as u64,
            gps_id: 0,
            ignore_flags: 0,
            gps_week: gps_time.week,
            gps_week_ms: gps_time.week_ms,
            fix_type: FixType::Fix3D,
            lat_e7: to_e7(lat),
            lon_e7: to_e7(lon),
            alt_m: alt as f32,
            hdop: self.accuracy.hdop,
            vdop: self.accuracy.vdop,
            velocity_ned: [velocity.x as f32, velocity.y as f32, velocity.z as f32],
            speed_accuracy: self.accuracy.speed_accuracy,
            horizontal_accuracy: self.accuracy.horizontal_accuracy,
            vertical_accuracy: self.accuracy.vertical_accuracy,
            num_satellites: self.num_satellites,
            yaw_cdeg: (self.yaw_deg * 100.0) as u16,
        }
    }
}

/// Degrees to degE7, truncating toward zero
pub fn to_e7(degrees: f64) -> i32 {
    (degrees * DEG_TO_E7) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.25;

    #[test]
    fn test_composition_order_truncates() {
        let composer = FixComposer::new(16, 0.0);
        let base = SimulatedPosition::new(10.0, 0.0, 0.0);
        let drift = DriftState::new(0.00001, 0.0, 0.0);
        let fix = composer.compose(&base, &drift, &FixNoise::zero(), NOW);
        assert_eq!(fix.lat_e7, 100_000_100);
    }

    #[test]
    fn test_truncation_toward_zero() {
        assert_eq!(to_e7(-35.363261), -353_632_610);
        assert_eq!(to_e7(149.165230), 1_491_652_300);
        assert_eq!(to_e7(0.00000009), 0);
        assert_eq!(to_e7(-0.00000009), 0);
    }

    #[test]
    fn test_noise_and_drift_applied() {
        let composer = FixComposer::new(12, 90.0);
        let base = SimulatedPosition::new(1.0, 2.0, 100.0);
        let drift = DriftState::new(0.5, 0.25, 0.0);
        let noise = FixNoise {
            latitude_deg: 0.125,
            longitude_deg: -0.25,
            altitude_m: 1.5,
            velocity_mps: Vector3::new(0.5, -0.5, 0.25),
        };
        let fix = composer.compose(&base, &drift, &noise, NOW);
        assert_eq!(fix.lat_e7, 16_250_000);
        assert_eq!(fix.lon_e7, 20_000_000);
        assert_eq!(fix.alt_m, 101.5);
        assert_eq!(fix.velocity_ned, [0.5, -0.5, 0.25]);
        assert_eq!(fix.num_satellites, 12);
        assert_eq!(fix.yaw_cdeg, 9000);
    }

    #[test]
    fn test_fixed_fields() {
        let composer = FixComposer::new(16, 0.0);
        let fix = composer.compose(
            &SimulatedPosition::new(-35.363261, 149.165230, 584.0),
            &DriftState::ZERO,
            &FixNoise::zero(),
            NOW,
        );
        assert_eq!(fix.fix_type, FixType::Fix3D);
        assert_eq!(fix.hdop, 0.3);
        assert_eq!(fix.vdop, 0.4);
        assert_eq!(fix.speed_accuracy, 0.2);
        assert_eq!(fix.horizontal_accuracy, 1.0);
        assert_eq!(fix.vertical_accuracy, 1.0);
        assert_eq!(fix.timestamp_us, 1_700_000_000_250_000);
        assert_eq!(fix.gps_week, 2288);
        assert_eq!(fix.gps_week_ms, 252_818_200);
        assert_eq!(fix.alt_m, 584.0);
        assert_eq!(fix.velocity_ned, [0.0, 0.0, 0.0]);
        assert_eq!(fix.gps_id, 0);
        assert_eq!(fix.ignore_flags, 0);
    }

    #[test]
    fn test_base_velocity() {
        let composer = FixComposer::new(16, 0.0).with_base_velocity(Vector3::new(3.0, 4.0, 0.0));
        let fix = composer.compose(
            &SimulatedPosition::new(0.0, 0.0, 0.0),
            &DriftState::ZERO,
            &FixNoise::zero(),
            NOW,
        );
        assert_eq!(fix.ground_speed(), 5.0);
    }
}
