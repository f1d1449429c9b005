//! Session facade, command surface and output formatting

pub mod session;
pub mod command;
pub mod formatting;

pub use session::{SessionState, SessionStatus, SpoofingSession};
pub use command::{Command, CommandProcessor, USAGE};
pub use formatting::{CsvFormatter, JsonFormatter, OutputFormat, TextFormatter};
