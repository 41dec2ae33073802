//! Virtual Node Simulation
//!
//! Runs the SmartTrack refresh loop headless and streams what the node
//! produces, for feeding downstream tooling or eyeballing the decision
//! policy without a browser:
//! - `json`: one alert payload per line
//! - `view`: the full view model per line
//! - `csv`: the three waveforms of each refresh, one row per sample
//!
//! # Usage
//! ```bash
//! ./simulation --mode periodic --count 30 --interval-ms 1000
//! ./simulation --override critical --count 1 --format csv --seed 7 > crack.csv
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use rand::prelude::*;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use smarttrack::config::defaults::{
    CONFIG_ENV_VAR, LOCAL_CONFIG_FILE, SIMULATION_DEFAULT_COUNT, SIMULATION_DEFAULT_INTERVAL_MS,
};
use smarttrack::config::{ConfigSource, NodeConfig};
use smarttrack::types::{AutoMode, Controls, SensorKind, SeverityLabel, SeverityOverride};
use smarttrack::view::{self, ViewModel};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    View,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "smarttrack-simulation")]
#[command(about = "Headless refresh loop for the SmartTrack virtual node")]
#[command(version = "1.0")]
struct Args {
    /// Number of refreshes to run
    #[arg(short = 'n', long, default_value_t = SIMULATION_DEFAULT_COUNT)]
    count: u32,

    /// Delay between refreshes in milliseconds (0 = no delay)
    #[arg(short, long, default_value_t = SIMULATION_DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Auto mode: idle, periodic or manual-only
    #[arg(short, long, default_value = "idle")]
    mode: AutoMode,

    /// Severity override: auto, no-crack, minor, major or critical
    #[arg(short, long = "override", default_value = "auto")]
    severity_override: SeverityOverride,

    /// Press the trigger for the first refresh
    #[arg(short, long)]
    trigger: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Suppress mission log (only output node data)
    #[arg(short, long)]
    quiet: bool,

    /// Node config file (default: SMARTTRACK_CONFIG / ./node_config.toml)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

// ============================================================================
// Debrief
// ============================================================================

/// Refresh tallies reported at the end of the run.
#[derive(Debug, Default)]
struct Tally {
    refreshes: u32,
    by_label: [u32; 4],
}

impl Tally {
    fn record(&mut self, label: SeverityLabel) {
        self.refreshes += 1;
        self.by_label[label_index(label)] += 1;
    }

    fn count(&self, label: SeverityLabel) -> u32 {
        self.by_label[label_index(label)]
    }

    fn crack_events(&self) -> u32 {
        SeverityLabel::CRACK_EVENTS.iter().map(|l| self.count(*l)).sum()
    }
}

fn label_index(label: SeverityLabel) -> usize {
    match label {
        SeverityLabel::NoCrack => 0,
        SeverityLabel::Minor => 1,
        SeverityLabel::Major => 2,
        SeverityLabel::Critical => 3,
    }
}

// ============================================================================
// Output
// ============================================================================

fn write_refresh<W: Write>(out: &mut W, index: u32, view: &ViewModel, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&view.alert)?)?,
        OutputFormat::View => writeln!(out, "{}", serde_json::to_string(view)?)?,
        OutputFormat::Csv => {
            let channel = |kind: SensorKind| {
                view.waveform(kind)
                    .map(|panel| &panel.waveform)
                    .with_context(|| format!("refresh {index} has no {kind} waveform"))
            };
            let ae = channel(SensorKind::AcousticEmission)?;
            let accel = channel(SensorKind::Accelerometer)?;
            let gw = channel(SensorKind::GuidedWave)?;

            let rows = ae
                .times
                .iter()
                .zip(&ae.amplitudes)
                .zip(accel.amplitudes.iter().zip(&gw.amplitudes));
            for ((t, a), (b, c)) in rows {
                writeln!(out, "{index},{t:.6},{a:.6},{b:.6},{c:.6}")?;
            }
        }
    }
    Ok(())
}

// ============================================================================
// Logging Utilities
// ============================================================================

fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

fn log_mission(elapsed: Duration, message: &str, quiet: bool) {
    if !quiet {
        eprintln!("[{}] {}", format_elapsed(elapsed), message);
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr so stdout stays pure node data
    let default_filter = if args.quiet { "error" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let (config, source, fallbacks) = match &args.config {
        Some(path) => {
            let config = NodeConfig::load_from_file(path)
                .with_context(|| format!("Failed to load node config {}", path.display()))?;
            (config, ConfigSource::LocalFile(path.clone()), Vec::new())
        }
        None => {
            let env_path = std::env::var(CONFIG_ENV_VAR).ok();
            let found = NodeConfig::discover(env_path.as_deref(), Path::new(LOCAL_CONFIG_FILE));
            (found.config, found.source, found.fallbacks)
        }
    };
    let policy = config.policy();

    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let zero = Duration::ZERO;
    let quiet = args.quiet;

    // Mission briefing
    log_mission(zero, &"=".repeat(70), quiet);
    log_mission(zero, "SMARTTRACK VIRTUAL NODE SIMULATION v1.0", quiet);
    log_mission(zero, &"=".repeat(70), quiet);
    log_mission(zero, "", quiet);
    log_mission(zero, &format!("CONFIG: {source}"), quiet);
    for reason in &fallbacks {
        // Printed even with --quiet
        eprintln!("WARNING: {reason}; skipped");
    }
    log_mission(zero, "", quiet);
    log_mission(zero, "NODE:", quiet);
    log_mission(zero, &format!("  ID: {}", config.node.id), quiet);
    log_mission(zero, &format!("  GPS: {}", config.node.gps_display()), quiet);
    log_mission(zero, &format!("  Edge CPU: {}", config.node.edge_cpu), quiet);
    log_mission(zero, "", quiet);
    log_mission(zero, "CONTROLS:", quiet);
    log_mission(
        zero,
        &format!("  Auto mode: {}", args.mode.selector_label(policy.periodic_window_secs())),
        quiet,
    );
    log_mission(zero, &format!("  Override: {}", args.severity_override.display_name()), quiet);
    log_mission(zero, &format!("  Trigger first refresh: {}", args.trigger), quiet);
    log_mission(zero, &format!("  Periodic window: {}s", policy.periodic_window_secs()), quiet);
    log_mission(zero, "", quiet);
    log_mission(zero, "SIMULATION PARAMETERS:", quiet);
    log_mission(zero, &format!("  Refreshes: {}", args.count), quiet);
    log_mission(zero, &format!("  Interval: {} ms", args.interval_ms), quiet);
    if let Some(seed) = args.seed {
        log_mission(zero, &format!("  Random seed: {}", seed), quiet);
    }
    log_mission(zero, &"=".repeat(70), quiet);

    if args.format == OutputFormat::Csv {
        println!("refresh,t,ae,accel,gw");
    }

    let start_time = Instant::now();
    let interval = Duration::from_millis(args.interval_ms);
    let mut tally = Tally::default();

    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();

    for index in 0..args.count {
        let loop_start = Instant::now();

        let controls = Controls::new(args.mode, args.severity_override, args.trigger && index == 0);
        let now = Local::now();
        let view = view::render(&config.node, &policy, &controls, &now, &mut rng);
        tally.record(view.severity());

        if view.severity().is_crack() {
            log_mission(
                start_time.elapsed(),
                &format!(
                    ">>> {} crack ({}) confidence {:.2} at {}",
                    view.severity(),
                    view.decision.reason.description(),
                    view.classification.confidence,
                    view.alert.timestamp
                ),
                quiet,
            );
        }

        write_refresh(&mut stdout_lock, index, &view, args.format)?;
        stdout_lock.flush()?;

        if index + 1 < args.count && !interval.is_zero() {
            let elapsed = loop_start.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
    }

    stdout_lock.flush()?;
    drop(stdout_lock);

    // Mission debrief
    let elapsed = start_time.elapsed();
    log_mission(elapsed, &"=".repeat(70), quiet);
    log_mission(elapsed, "SIMULATION COMPLETE", quiet);
    log_mission(elapsed, &"=".repeat(70), quiet);
    log_mission(elapsed, &format!("Refreshes: {}", tally.refreshes), quiet);
    log_mission(elapsed, &format!("Crack events: {}", tally.crack_events()), quiet);
    for label in SeverityLabel::ALL {
        log_mission(elapsed, &format!("  {:<9} {}", label.display_name(), tally.count(label)), quiet);
    }
    log_mission(elapsed, &format!("Real time: {:.1}s", elapsed.as_secs_f64()), quiet);
    log_mission(elapsed, &"=".repeat(70), quiet);

    Ok(())
}
