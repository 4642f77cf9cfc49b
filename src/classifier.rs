//! Pass/fail decision over a complete sensor reading.
//!
//! Deliberately a pure, total function: no clock, no randomness, no vision
//! confidence. Vision output only ever influences the seal flag upstream,
//! so every verdict is reproducible from the three stored fields alone.

use serde::{Deserialize, Serialize};

use crate::models::InspectionStatus;

/// Acceptance bounds, all inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub weight_min: f64,
    pub weight_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature_min: 0.0,
            temperature_max: 25.0,
            weight_min: 100.0,
            weight_max: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub status: InspectionStatus,
    pub reason: String,
}

/// Classify a complete reading. Checks run in fixed order (temperature,
/// weight, seal) and the first failing one determines the reason.
pub fn classify(temperature: f64, weight: f64, sealed: bool, thresholds: &Thresholds) -> Verdict {
    if temperature < thresholds.temperature_min || temperature > thresholds.temperature_max {
        return Verdict {
            status: InspectionStatus::Rejected,
            reason: format!(
                "Temperature out of range: {temperature}°C (allowed {}-{}°C)",
                thresholds.temperature_min, thresholds.temperature_max
            ),
        };
    }

    if weight < thresholds.weight_min || weight > thresholds.weight_max {
        return Verdict {
            status: InspectionStatus::Rejected,
            reason: format!(
                "Weight out of range: {weight}g (allowed {}-{}g)",
                thresholds.weight_min, thresholds.weight_max
            ),
        };
    }

    if !sealed {
        return Verdict {
            status: InspectionStatus::Rejected,
            reason: "Package seal is broken or missing".to_string(),
        };
    }

    Verdict {
        status: InspectionStatus::Passed,
        reason: "All quality checks passed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(temperature: f64, weight: f64, sealed: bool) -> Verdict {
        classify(temperature, weight, sealed, &Thresholds::default())
    }

    #[test]
    fn nominal_reading_passes() {
        let verdict = check(20.0, 500.0, true);
        assert_eq!(verdict.status, InspectionStatus::Passed);
        assert_eq!(verdict.reason, "All quality checks passed");
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        assert_eq!(check(0.0, 500.0, true).status, InspectionStatus::Passed);
        assert_eq!(check(25.0, 500.0, true).status, InspectionStatus::Passed);

        let low = check(-0.1, 500.0, true);
        assert_eq!(low.status, InspectionStatus::Rejected);
        assert!(low.reason.contains("Temperature"));

        let high = check(25.1, 500.0, true);
        assert_eq!(high.status, InspectionStatus::Rejected);
        assert!(high.reason.contains("Temperature"));
    }

    #[test]
    fn weight_bounds_are_inclusive() {
        assert_eq!(check(20.0, 100.0, true).status, InspectionStatus::Passed);
        assert_eq!(check(20.0, 1000.0, true).status, InspectionStatus::Passed);

        let light = check(20.0, 99.9, true);
        assert_eq!(light.status, InspectionStatus::Rejected);
        assert!(light.reason.contains("Weight"));

        let heavy = check(20.0, 1000.1, true);
        assert_eq!(heavy.status, InspectionStatus::Rejected);
        assert!(heavy.reason.contains("Weight"));
    }

    #[test]
    fn broken_seal_rejects() {
        let verdict = check(20.0, 500.0, false);
        assert_eq!(verdict.status, InspectionStatus::Rejected);
        assert!(verdict.reason.contains("seal"));
    }

    #[test]
    fn first_failing_check_wins() {
        // Temperature is checked before weight, weight before seal.
        let verdict = check(30.0, 50.0, false);
        assert!(verdict.reason.contains("Temperature"));

        let verdict = check(20.0, 50.0, false);
        assert!(verdict.reason.contains("Weight"));
    }

    #[test]
    fn classification_is_deterministic() {
        let first = check(30.0, 500.0, true);
        for _ in 0..10 {
            assert_eq!(check(30.0, 500.0, true), first);
        }
        assert_eq!(first.status, InspectionStatus::Rejected);
        assert!(first.reason.contains("Temperature"));
    }
}
