//! fakegps CLI
//!
//! Runs a spoofing session in a polling loop. Fixes are written to stdout,
//! operator commands are read from stdin and diagnostics go to stderr.

use clap::Parser;
use fakegps::link::{FixSink, RecoveryStrategy, WriterSink};
use fakegps::api::USAGE;
use fakegps::logging;
use fakegps::{CommandProcessor, ConfigurationManager, DriftMode, OutputFormat, SpoofConfig, SpoofError, SpoofingSession};
use std::io::{self, BufRead};
use std::process;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "fakegps")]
#[command(about = "Generate synthetic GPS fixes with optional spoofing drift", long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<String>,

    /// Simulated latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Simulated longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Simulated altitude in meters
    #[arg(long, allow_negative_numbers = true)]
    alt: Option<f64>,

    /// Fix emission rate in Hz (0 disables output)
    #[arg(long)]
    rate: Option<f64>,

    /// Drift mode: constant or steered
    #[arg(long)]
    mode: Option<DriftMode>,

    /// Output format for fixes: text, json or csv
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Polling interval in milliseconds
    #[arg(long, default_value = "10")]
    tick_ms: u64,

    /// Stop after this many seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Begin with spoofing active
    #[arg(long)]
    start_spoofing: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_config(args: &Args) -> Result<SpoofConfig, SpoofError> {
    let manager = match &args.config {
        Some(path) => ConfigurationManager::from_file(path)?,
        None => ConfigurationManager::new(),
    };
    let mut config = manager.into_config();

    if let Some(lat) = args.lat {
        config.lat = lat;
    }
    if let Some(lon) = args.lon {
        config.lon = lon;
    }
    if let Some(alt) = args.alt {
        config.alt = alt;
    }
    if let Some(rate) = args.rate {
        config.rate_hz = rate;
    }
    if let Some(mode) = args.mode {
        config.drift_mode = mode;
    }

    config.check()?;
    Ok(config)
}

/// Forward stdin lines to the polling loop
fn spawn_command_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.verbose) {
        eprintln!("Error initializing logging: {}", e);
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };
    for warning in config.validate().warnings {
        warn!("{}", warning);
    }

    let mut session = match SpoofingSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error creating session: {}", e);
            process::exit(1);
        }
    };
    if args.start_spoofing {
        session.start();
    }

    let commands = spawn_command_reader();
    let mut stdin_open = true;
    let mut processor = CommandProcessor::new();
    let mut sink = WriterSink::new(io::stdout().lock(), args.format);
    let tick = Duration::from_millis(args.tick_ms.max(1));
    let started = Instant::now();

    info!(format = %args.format, tick_ms = args.tick_ms, "fix generator running");

    loop {
        while stdin_open {
            match commands.try_recv() {
                Ok(line) => match processor.execute_line(&mut session, &line) {
                    Ok(reply) => eprintln!("{}", reply),
                    Err(e) => {
                        eprintln!("{}", e);
                        if matches!(e, SpoofError::UnknownCommand { .. }) {
                            eprintln!("{}", USAGE);
                        }
                    }
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => stdin_open = false,
            }
        }

        if let Some(fix) = processor.tick(&mut session, unix_now()) {
            let sent = sink.send_fix(&fix).and_then(|_| sink.flush());
            if let Err(e) = sent {
                match e.recovery_strategy() {
                    RecoveryStrategy::Fail => {
                        error!(error = %e, "fix output closed");
                        break;
                    }
                    RecoveryStrategy::Retry | RecoveryStrategy::Skip => {
                        warn!(error = %e, "fix dropped");
                    }
                }
            }
        }

        if let Some(limit) = args.duration {
            if started.elapsed().as_secs_f64() >= limit {
                break;
            }
        }
        thread::sleep(tick);
    }

    info!(
        fixes = session.fixes_emitted(),
        sent = sink.sent_count(),
        "fix generator stopped"
    );
}
