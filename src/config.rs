use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::classifier::Thresholds;

/// Station configuration. Read once at startup; a missing or unreadable
/// file falls back to defaults so a bare install still runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionConfig {
    /// Vision endpoint accepting `{"image": ...}` POSTs.
    pub vision_endpoint: String,
    /// Live-analysis period in milliseconds.
    pub capture_interval_ms: u64,
    pub thresholds: Thresholds,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            vision_endpoint: "http://localhost:5001/predict".to_string(),
            capture_interval_ms: 800,
            thresholds: Thresholds::default(),
        }
    }
}

impl InspectionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = InspectionConfig::load(Path::new("/nonexistent/packcheck.json")).unwrap();
        assert_eq!(config.capture_interval_ms, 800);
        assert_eq!(config.thresholds.temperature_max, 25.0);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InspectionConfig::default();
        config.capture_interval_ms = 500;
        config.vision_endpoint = "http://vision.local/predict".into();
        config.save(&path).unwrap();

        let loaded = InspectionConfig::load(&path).unwrap();
        assert_eq!(loaded.capture_interval_ms, 500);
        assert_eq!(loaded.vision_endpoint, "http://vision.local/predict");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"captureIntervalMs": 250}"#).unwrap();

        let loaded = InspectionConfig::load(&path).unwrap();
        assert_eq!(loaded.capture_interval_ms, 250);
        assert_eq!(loaded.vision_endpoint, "http://localhost:5001/predict");
    }
}
