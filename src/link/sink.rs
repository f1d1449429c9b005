//! Fix sink trait: the transport side of the generator

use crate::core::FixRecord;
use crate::link::LinkResult;

/// Receives composed fixes and takes care of encoding and delivery
pub trait FixSink {
    /// Deliver one fix
    fn send_fix(&mut self, fix: &FixRecord) -> LinkResult<()>;

    /// Check if the sink can accept fixes
    fn is_connected(&self) -> bool;

    /// Flush any buffered output
    fn flush(&mut self) -> LinkResult<()>;

    /// Number of fixes delivered so far
    fn sent_count(&self) -> u64;
}
