//! Config validation: unknown-key detection with edit-distance suggestions
//! and value range checks.
//!
//! Unknown keys are reported as warnings before serde deserialization so a
//! typo in `node_config.toml` is visible instead of silently falling back
//! to a default. Warnings never reject a config.

use std::collections::HashSet;

use crate::types::NodeInfo;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

/// Every valid dotted key path for `NodeConfig`.
///
/// Kept by hand in step with the structs in `node_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    [
        // [node]
        "node",
        "node.id",
        "node.gps",
        "node.edge_cpu",
        "node.power",
        // [simulation]
        "simulation",
        "simulation.periodic_window_secs",
        "simulation.auto_refresh_secs",
        // [server]
        "server",
        "server.addr",
    ]
    .into_iter()
    .collect()
}

/// Collect dotted key paths from a parsed TOML tree.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Closest known key within edit distance 3, if any.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, d)| *d <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

/// Parse raw TOML and return a warning for every unknown key.
///
/// Syntax errors are left for the serde pass to report.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

/// Check node identity values; returns one message per problem.
pub fn validate_node(node: &NodeInfo) -> Vec<String> {
    let mut errors = Vec::new();

    if node.id.trim().is_empty() {
        errors.push("node.id must not be empty".to_string());
    }

    match node.coordinates() {
        None => errors.push(format!(
            "node.gps must be \"<lat>,<lon>\", got \"{}\"",
            node.gps
        )),
        Some((lat, lon)) => {
            if !(-90.0..=90.0).contains(&lat) {
                errors.push(format!("node.gps latitude {lat} outside [-90, 90]"));
            }
            if !(-180.0..=180.0).contains(&lon) {
                errors.push(format!("node.gps longitude {lon} outside [-180, 180]"));
            }
        }
    }

    errors
}
