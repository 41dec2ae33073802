//! Node Configuration Module
//!
//! Per-node configuration loaded from TOML, with every value defaulting to
//! the demo's built-in constants.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the server or simulation command line
//! 2. `SMARTTRACK_CONFIG` environment variable (path to TOML file)
//! 3. `node_config.toml` in the current working directory
//! 4. Built-in defaults
//!
//! The loaded [`NodeConfig`] is passed explicitly into the HTTP state and
//! the simulation CLI; there is no global.
//!
//! ```ignore
//! let config = NodeConfig::load();
//! let policy = config.policy();
//! ```

pub mod defaults;
mod node_config;
pub mod validation;

pub use node_config::*;
