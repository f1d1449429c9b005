//! Control-input sources for steered drift

use crate::core::ControlInput;
use std::collections::VecDeque;

/// Supplies one control reading per tick
pub trait ControlSource {
    /// Current reading, or `None` when no device is available
    fn read(&mut self) -> Option<ControlInput>;
}

/// Holds the last commanded stick position until changed.
///
/// Stands in for a joystick when steering from the command line.
#[derive(Debug, Clone, Default)]
pub struct HeldControl {
    current: Option<ControlInput>,
}

impl HeldControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, input: ControlInput) {
        self.current = Some(input);
    }

    /// Return the stick to neutral
    pub fn release(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<ControlInput> {
        self.current
    }
}

impl ControlSource for HeldControl {
    fn read(&mut self) -> Option<ControlInput> {
        self.current
    }
}

/// Replays a fixed sequence of readings, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedControl {
    readings: VecDeque<ControlInput>,
}

impl ScriptedControl {
    pub fn new<I: IntoIterator<Item = ControlInput>>(readings: I) -> Self {
        Self {
            readings: readings.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl ControlSource for ScriptedControl {
    fn read(&mut self) -> Option<ControlInput> {
        self.readings.pop_front()
    }
}
