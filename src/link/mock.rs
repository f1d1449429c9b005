//! Mock sink for testing and development

use crate::core::FixRecord;
use crate::link::{FixSink, LinkError, LinkResult};

/// Records every fix it receives
#[derive(Debug, Default)]
pub struct MockSink {
    sent_fixes: Vec<FixRecord>,
    connected: bool,
    flush_count: u32,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            sent_fixes: Vec::new(),
            connected: true,
            flush_count: 0,
        }
    }

    /// Simulate connection loss
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Restore connection
    pub fn reconnect(&mut self) {
        self.connected = true;
    }

    /// Get all fixes that were sent to this sink
    pub fn get_sent_fixes(&self) -> &[FixRecord] {
        &self.sent_fixes
    }

    pub fn last_fix(&self) -> Option<&FixRecord> {
        self.sent_fixes.last()
    }

    pub fn clear_sent_fixes(&mut self) {
        self.sent_fixes.clear();
    }

    pub fn flush_count(&self) -> u32 {
        self.flush_count
    }
}

impl FixSink for MockSink {
    fn send_fix(&mut self, fix: &FixRecord) -> LinkResult<()> {
        if !self.connected {
            return Err(LinkError::Disconnected);
        }
        self.sent_fixes.push(fix.clone());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn flush(&mut self) -> LinkResult<()> {
        self.flush_count += 1;
        Ok(())
    }

    fn sent_count(&self) -> u64 {
        self.sent_fixes.len() as u64
    }
}
