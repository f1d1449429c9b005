//! Collaborator seams: where fixes go and where control input comes from
//!
//! The generator core only computes fixes. Delivering them (and reading a
//! joystick for steered drift) happens behind the traits defined here.

pub mod sink;
pub mod writer;
pub mod mock;
pub mod control;
pub mod error;

pub use sink::FixSink;
pub use writer::WriterSink;
pub use mock::MockSink;
pub use control::{ControlSource, HeldControl, ScriptedControl};
pub use error::{LinkError, LinkResult, RecoveryStrategy};
