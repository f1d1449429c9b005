//! Textual command surface for controlling a spoofing session

use crate::api::session::SpoofingSession;
use crate::core::{ControlInput, FixRecord};
use crate::link::{ControlSource, HeldControl};
use crate::processing::DriftMode;
use crate::validation::error::{parse_f64, SpoofError, SpoofResult};
use tracing::{info, warn};

pub const USAGE: &str =
    "usage: fakegps <set|set-position|setpos|start-spoofing|startspoof|stop-spoofing|stopspoof|status|reset|click|stick>";

/// A parsed operator command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    StartSpoofing,
    StopSpoofing,
    /// Move the position; without coordinates the last map click is used
    SetPosition {
        coordinates: Option<(f64, f64)>,
        alt: Option<String>,
    },
    /// List every option
    ListSettings,
    ShowSetting { option: String },
    SetSetting { option: String, value: String },
    Status,
    Reset,
    /// Record an external map click location
    Click { lat: f64, lon: f64 },
    /// Hold the virtual stick at (x, y)
    Stick { axis_x: f64, axis_y: f64 },
    Help,
}

impl Command {
    /// Parse one command line. A leading `fakegps` word is ignored.
    pub fn parse(line: &str) -> SpoofResult<Command> {
        let mut words: Vec<&str> = line.split_whitespace().collect();
        if words.first() == Some(&"fakegps") {
            words.remove(0);
        }
        let Some((&name, args)) = words.split_first() else {
            return Ok(Command::Help);
        };

        match name {
            "start-spoofing" | "startspoof" => Ok(Command::StartSpoofing),
            "stop-spoofing" | "stopspoof" => Ok(Command::StopSpoofing),
            "set-position" | "setpos" => parse_set_position(name, args),
            "set" => parse_set(args),
            "status" => Ok(Command::Status),
            "reset" => Ok(Command::Reset),
            "click" => match args {
                [lat, lon] => Ok(Command::Click {
                    lat: parse_f64("latitude", lat)?,
                    lon: parse_f64("longitude", lon)?,
                }),
                _ => Err(invalid(name, "click <lat> <lon>")),
            },
            "stick" => match args {
                [x, y] => Ok(Command::Stick {
                    axis_x: parse_f64("axis_x", x)?,
                    axis_y: parse_f64("axis_y", y)?,
                }),
                ["release"] => Ok(Command::Stick { axis_x: 0.0, axis_y: 0.0 }),
                _ => Err(invalid(name, "stick <x> <y> | stick release")),
            },
            "help" => Ok(Command::Help),
            other => Err(SpoofError::UnknownCommand {
                command: other.to_string(),
            }),
        }
    }
}

fn invalid(command: &str, usage: &str) -> SpoofError {
    SpoofError::InvalidArguments {
        command: command.to_string(),
        usage: usage.to_string(),
    }
}

fn parse_set_position(name: &str, args: &[&str]) -> SpoofResult<Command> {
    match args {
        [] => Ok(Command::SetPosition { coordinates: None, alt: None }),
        [alt] => Ok(Command::SetPosition {
            coordinates: None,
            alt: Some(alt.to_string()),
        }),
        [lat, lon, rest @ ..] if rest.len() <= 1 => Ok(Command::SetPosition {
            coordinates: Some((parse_f64("latitude", lat)?, parse_f64("longitude", lon)?)),
            alt: rest.first().map(|alt| alt.to_string()),
        }),
        _ => Err(invalid(name, "set-position [<lat> <lon>] [alt]")),
    }
}

fn parse_set(args: &[&str]) -> SpoofResult<Command> {
    match args {
        [] => Ok(Command::ListSettings),
        [assignment] => match assignment.split_once('=') {
            Some((option, value)) => Ok(Command::SetSetting {
                option: option.trim().to_string(),
                value: value.trim().to_string(),
            }),
            None => Ok(Command::ShowSetting {
                option: assignment.to_string(),
            }),
        },
        [option, value] => Ok(Command::SetSetting {
            option: option.to_string(),
            value: value.to_string(),
        }),
        _ => Err(invalid("set", "set <option>=<value>")),
    }
}

/// Executes commands against a session.
///
/// Also holds the state that belongs to the operator rather than the
/// session: the last map click and the virtual stick.
#[derive(Debug, Default)]
pub struct CommandProcessor {
    click_location: Option<(f64, f64)>,
    control: HeldControl,
}

impl CommandProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click_location(&self) -> Option<(f64, f64)> {
        self.click_location
    }

    pub fn set_click_location(&mut self, lat: f64, lon: f64) {
        self.click_location = Some((lat, lon));
    }

    /// Control reading to pass into the next tick
    pub fn control_input(&self) -> Option<ControlInput> {
        self.control.current()
    }

    pub fn control_mut(&mut self) -> &mut HeldControl {
        &mut self.control
    }

    /// Run one session tick with the held stick
    pub fn tick(&mut self, session: &mut SpoofingSession, now: f64) -> Option<FixRecord> {
        let control = self.control.read();
        let fix = session.on_tick(now, control);
        self.follow_steering(session, fix.is_some());
        fix
    }

    /// Run one session tick reading an external control source instead
    /// of the held stick
    pub fn tick_from<S: ControlSource>(
        &mut self,
        session: &mut SpoofingSession,
        now: f64,
        source: &mut S,
    ) -> Option<FixRecord> {
        let fix = session.on_tick(now, source.read());
        self.follow_steering(session, fix.is_some());
        fix
    }

    // Steering moves the click location along with the position, so a bare
    // `setpos` re-anchors where steering left off.
    fn follow_steering(&mut self, session: &SpoofingSession, emitted: bool) {
        if emitted && session.is_active() && session.drift_mode() == DriftMode::Steered {
            let position = session.position();
            self.click_location = Some((position.latitude, position.longitude));
        }
    }

    /// Parse and run one line, returning the reply for the operator
    pub fn execute_line(&mut self, session: &mut SpoofingSession, line: &str) -> SpoofResult<String> {
        let result = Command::parse(line).and_then(|command| self.execute(session, command));
        if let Err(err) = &result {
            warn!(command = line.trim(), error = %err, "command rejected");
        }
        result
    }

    pub fn execute(&mut self, session: &mut SpoofingSession, command: Command) -> SpoofResult<String> {
        match command {
            Command::StartSpoofing => {
                session.start();
                Ok("GPS spoofing started".to_string())
            }
            Command::StopSpoofing => {
                session.stop();
                Ok("GPS spoofing stopped".to_string())
            }
            Command::SetPosition { coordinates, alt } => {
                let source = coordinates.or(self.click_location);
                let pos = session.set_position_from(source, alt.as_deref())?;
                Ok(format!(
                    "Position set to {:.7}, {:.7}, {:.1}m",
                    pos.latitude, pos.longitude, pos.altitude
                ))
            }
            Command::ListSettings => Ok(session
                .config()
                .list_options()
                .into_iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("\n")),
            Command::ShowSetting { option } => {
                let value = session.config().option_value(&option)?;
                Ok(format!("{}={}", option, value))
            }
            Command::SetSetting { option, value } => {
                let old_value = session.set_option(&option, &value)?;
                info!(option = %option, old = %old_value, new = %value, "setting changed");
                Ok(format!("{}: {} -> {}", option, old_value, value))
            }
            Command::Status => Ok(session.status().to_string()),
            Command::Reset => {
                session.reset();
                self.control.release();
                Ok("Session reset".to_string())
            }
            Command::Click { lat, lon } => {
                self.set_click_location(lat, lon);
                Ok(format!("Click location {:.7}, {:.7}", lat, lon))
            }
            Command::Stick { axis_x, axis_y } => {
                let input = ControlInput::new(axis_x, axis_y);
                if input.is_neutral() {
                    self.control.release();
                } else {
                    self.control.set(input);
                }
                Ok(format!("Stick at {:.2}, {:.2}", input.axis_x, input.axis_y))
            }
            Command::Help => Ok(USAGE.to_string()),
        }
    }
}
