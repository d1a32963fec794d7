//! Admin service configuration.
//!
//! Loaded from a JSON file; every field has a default so a partial file is
//! enough.

use std::path::Path;

use serde::Deserialize;

use crate::state::{AdminError, Coordinate};

/// Default tracing filter when neither the config nor `RUST_LOG` set one.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,

    /// Pacdot layout
    pub board: BoardConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            board: BoardConfig::default(),
        }
    }
}

impl AdminConfig {
    pub fn from_json(text: &str) -> Result<Self, AdminError> {
        serde_json::from_str(text).map_err(|e| AdminError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, AdminError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AdminError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }
}

/// One pacdot position in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PacdotConfig {
    pub location: Coordinate,
    #[serde(default)]
    pub powerdot: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardConfig {
    pub pacdots: Vec<PacdotConfig>,
}

impl Default for BoardConfig {
    /// A 4x4 grid with powerdots in the corners.
    fn default() -> Self {
        const ORIGIN: (f64, f64) = (34.0689, -118.4452);
        const STEP: f64 = 0.0005;
        const SIDE: usize = 4;

        let pacdots = (0..SIDE)
            .flat_map(|row| (0..SIDE).map(move |col| (row, col)))
            .map(|(row, col)| PacdotConfig {
                location: Coordinate::new(
                    ORIGIN.0 + row as f64 * STEP,
                    ORIGIN.1 + col as f64 * STEP,
                ),
                powerdot: (row == 0 || row == SIDE - 1) && (col == 0 || col == SIDE - 1),
            })
            .collect();

        Self { pacdots }
    }
}
