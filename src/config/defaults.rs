//! System-wide default constants.
//!
//! Centralises the fixed numbers of the simulated node, grouped by
//! subsystem.

// ============================================================================
// Synthesis
// ============================================================================

/// Samples per synthesized waveform (one-second window, [0, 1] inclusive).
pub const WAVEFORM_SAMPLES: usize = 800;

// ============================================================================
// Decision Policy
// ============================================================================

/// Periodic-mode window (seconds). The event fires during the first second
/// of each window.
pub const PERIODIC_WINDOW_SECS: u64 = 10;

// ============================================================================
// Dashboard
// ============================================================================

/// Page auto-refresh interval while periodic mode is selected (seconds).
///
/// One second matches the event window width, so every window is sampled.
pub const AUTO_REFRESH_SECS: u64 = 1;

/// Default HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";

// ============================================================================
// Config Discovery
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SMARTTRACK_CONFIG";

/// Config file looked for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "node_config.toml";

/// Environment variable overriding `server.addr`.
pub const ADDR_ENV_VAR: &str = "SMARTTRACK_ADDR";

/// Environment variable listing allowed CORS origins (comma-separated).
pub const CORS_ENV_VAR: &str = "SMARTTRACK_CORS_ORIGINS";

// ============================================================================
// Simulation CLI
// ============================================================================

/// Refreshes produced by the simulation binary when `--count` is omitted.
pub const SIMULATION_DEFAULT_COUNT: u32 = 10;

/// Delay between simulated refreshes (milliseconds).
pub const SIMULATION_DEFAULT_INTERVAL_MS: u64 = 1_000;
