use rand::Rng;
use serde::{Deserialize, Serialize};

/// Display colors matching the inspection UI convention.
const COLOR_SEALED: &str = "#2ecc71";
const COLOR_UNSEALED: &str = "#e74c3c";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SealStatus {
    Sealed,
    Unsealed,
    NoObject,
}

impl SealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SealStatus::Sealed => "SEALED",
            SealStatus::Unsealed => "UNSEALED",
            SealStatus::NoObject => "NO_OBJECT",
        }
    }

    /// Map a service status label. Unknown or missing labels become
    /// `NoObject` rather than an error.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("SEALED") => SealStatus::Sealed,
            Some("UNSEALED") => SealStatus::Unsealed,
            _ => SealStatus::NoObject,
        }
    }
}

/// One vision analysis result. Never persisted directly; it only feeds the
/// session's seal flag (and the live overlay) while a package is detected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisionVerdict {
    pub package_detected: bool,
    pub sealed: bool,
    pub status: SealStatus,
    /// Pre-formatted percentage, e.g. `"93.4%"`. Originates at the service;
    /// no numeric reproducibility is promised.
    pub confidence: String,
    pub color: String,
    /// True when this verdict was generated locally because the vision
    /// service was unavailable.
    pub fallback: bool,
}

impl VisionVerdict {
    pub fn new(package_detected: bool, sealed: bool, status: SealStatus, confidence: String) -> Self {
        Self {
            package_detected,
            sealed,
            status,
            confidence,
            color: seal_color(sealed).to_string(),
            fallback: false,
        }
    }

    /// Best-effort local verdict for the explicit-capture path when the
    /// service cannot be reached: 70% sealed, confidence 85-99%.
    pub fn fallback() -> Self {
        let mut rng = rand::thread_rng();
        let sealed = rng.gen_bool(0.7);
        let confidence = rng.gen_range(85.0..99.0f64);
        Self {
            package_detected: false,
            sealed,
            status: if sealed {
                SealStatus::Sealed
            } else {
                SealStatus::Unsealed
            },
            confidence: format!("{confidence:.1}%"),
            color: seal_color(sealed).to_string(),
            fallback: true,
        }
    }
}

fn seal_color(sealed: bool) -> &'static str {
    if sealed {
        COLOR_SEALED
    } else {
        COLOR_UNSEALED
    }
}
