use rand::Rng;
use serde::{Deserialize, Serialize};

/// A partial sensor reading. Fields arrive independently (device line
/// fragments, vision analysis, manual entry), so each one stays absent
/// until something actually reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
    pub sealed: Option<bool>,
}

impl SensorReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is present (e.g. a device line that matched
    /// neither wire format).
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.weight.is_none() && self.sealed.is_none()
    }

    /// Submit-eligible: temperature, weight and seal state are all present.
    pub fn is_complete(&self) -> bool {
        self.temperature.is_some() && self.weight.is_some() && self.sealed.is_some()
    }

    /// Overlay the fields present in `partial` onto this reading. Absent
    /// fields in `partial` leave the existing values untouched.
    pub fn merge(&mut self, partial: &SensorReading) {
        if let Some(temperature) = partial.temperature {
            self.temperature = Some(temperature);
        }
        if let Some(weight) = partial.weight {
            self.weight = Some(weight);
        }
        if let Some(sealed) = partial.sealed {
            self.sealed = Some(sealed);
        }
    }

    /// Random complete reading for bench use without hardware:
    /// temperature 0-30°C, weight 50-1200g, 80% sealed.
    pub fn simulate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            temperature: Some((rng.gen_range(0.0..30.0f64) * 10.0).round() / 10.0),
            weight: Some(rng.gen_range(50.0..1200.0f64).round()),
            sealed: Some(rng.gen_bool(0.8)),
        }
    }
}
