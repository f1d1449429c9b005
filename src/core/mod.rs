//! Core types and constants for the fake GPS generator

pub mod types;
pub mod constants;
pub mod gps_time;

pub use types::*;
pub use constants::*;
pub use gps_time::GpsTime;
