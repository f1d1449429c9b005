//! Fix output formatting and serialization
//!
//! Human-readable text, JSON lines and CSV renderings of a [`FixRecord`].

use crate::core::FixRecord;
use std::fmt;
use std::str::FromStr;

/// Output format for emitted fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Text formatter for terminals and logs
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Single-line output
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, fix: &FixRecord) -> String {
        if self.compact {
            return format!(
                "Fix: {:.7}°, {:.7}°, {:.1}m | vel {:.2},{:.2},{:.2} m/s | sats {} | week {} {}ms",
                fix.latitude_deg(),
                fix.longitude_deg(),
                fix.alt_m,
                fix.velocity_ned[0],
                fix.velocity_ned[1],
                fix.velocity_ned[2],
                fix.num_satellites,
                fix.gps_week,
                fix.gps_week_ms
            );
        }

        let mut output = String::new();
        output.push_str("GPS input:\n");
        output.push_str(&format!("  Latitude:   {:.7}° ({})\n", fix.latitude_deg(), fix.lat_e7));
        output.push_str(&format!("  Longitude:  {:.7}° ({})\n", fix.longitude_deg(), fix.lon_e7));
        output.push_str(&format!("  Altitude:   {:.2} m\n", fix.alt_m));
        output.push_str(&format!(
            "  Velocity:   N {:.3} E {:.3} D {:.3} m/s\n",
            fix.velocity_ned[0], fix.velocity_ned[1], fix.velocity_ned[2]
        ));
        output.push_str(&format!("  Fix:        {:?}, {} satellites\n", fix.fix_type, fix.num_satellites));
        output.push_str(&format!("  DOP:        h {:.1} v {:.1}\n", fix.hdop, fix.vdop));
        output.push_str(&format!("  GPS time:   week {} + {} ms\n", fix.gps_week, fix.gps_week_ms));
        output
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, fix: &FixRecord) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(fix)
        } else {
            serde_json::to_string(fix)
        }
    }
}

/// CSV formatter for data logging
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Emit a header row before the first record
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { include_header: true }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        "timestamp_us,gps_week,gps_week_ms,fix_type,lat_e7,lon_e7,alt_m,vn,ve,vd,hdop,vdop,num_satellites,yaw_cdeg"
            .to_string()
    }

    pub fn format_csv(&self, fix: &FixRecord) -> String {
        format!(
            "{},{},{},{},{},{},{:.3},{:.3},{:.3},{:.3},{:.1},{:.1},{},{}",
            fix.timestamp_us,
            fix.gps_week,
            fix.gps_week_ms,
            fix.fix_type.code(),
            fix.lat_e7,
            fix.lon_e7,
            fix.alt_m,
            fix.velocity_ned[0],
            fix.velocity_ned[1],
            fix.velocity_ned[2],
            fix.hdop,
            fix.vdop,
            fix.num_satellites,
            fix.yaw_cdeg
        )
    }
}
