//! Node identity and the alert payload emitted every refresh

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::SeverityLabel;

/// Timestamp layout used in the alert payload.
pub const ALERT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Static metadata for the simulated anchor node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeInfo {
    /// Node identifier reported in every alert
    #[serde(default = "default_node_id")]
    pub id: String,

    /// "lat,lon" as reported in the alert payload
    #[serde(default = "default_gps")]
    pub gps: String,

    /// Edge compute description (display only)
    #[serde(default = "default_edge_cpu")]
    pub edge_cpu: String,

    /// Power supply description (display only)
    #[serde(default = "default_power")]
    pub power: String,
}

fn default_node_id() -> String {
    "ANCHOR-001".to_string()
}

fn default_gps() -> String {
    "11.0100,76.9500".to_string()
}

fn default_edge_cpu() -> String {
    "Virtual ESP32 / RPi Zero".to_string()
}

fn default_power() -> String {
    "Solar + LiFePO4 (simulated)".to_string()
}

impl Default for NodeInfo {
    fn default() -> Self {
        Self {
            id: default_node_id(),
            gps: default_gps(),
            edge_cpu: default_edge_cpu(),
            power: default_power(),
        }
    }
}

impl NodeInfo {
    /// Parse the GPS string into (latitude, longitude).
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = self.gps.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok()?;
        let lon = lon.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }

    /// GPS with a space after the comma, as shown in the node panel
    pub fn gps_display(&self) -> String {
        match self.coordinates() {
            Some((lat, lon)) => format!("{lat:.4}, {lon:.4}"),
            None => self.gps.clone(),
        }
    }
}

/// JSON alert produced by one refresh.
///
/// Has no identity and is never stored; it exists to be displayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRecord {
    pub node_id: String,
    pub gps: String,
    pub severity: SeverityLabel,
    /// Mock classifier confidence, already rounded to two decimals
    pub confidence: f64,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    #[serde(rename = "waveform_samples")]
    pub sample_count: usize,
}

impl AlertRecord {
    pub fn new<Tz: TimeZone>(
        node: &NodeInfo,
        severity: SeverityLabel,
        confidence: f64,
        now: &DateTime<Tz>,
        sample_count: usize,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            node_id: node.id.clone(),
            gps: node.gps.clone(),
            severity,
            confidence,
            timestamp: now.format(ALERT_TIMESTAMP_FORMAT).to_string(),
            sample_count,
        }
    }
}
