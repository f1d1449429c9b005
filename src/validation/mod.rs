//! Error classification and input validation

pub mod error;

pub use error::{parse_f64, SpoofError, SpoofResult};
