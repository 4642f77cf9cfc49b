use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum InspectionStatus {
    Passed,
    Rejected,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Passed => "passed",
            InspectionStatus::Rejected => "rejected",
        }
    }
}

/// What the presentation layer submits: the fused reading plus the captured
/// image. Status and reason are computed by the store via the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInspection {
    pub package_id: String,
    pub temperature: f64,
    pub weight: f64,
    pub is_sealed: bool,
    pub image_data: String,
}

/// One persisted inspection. Created exactly once per submission and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub id: String,
    pub package_id: String,
    pub temperature: f64,
    pub weight: f64,
    pub is_sealed: bool,
    pub image_data: String,
    pub status: InspectionStatus,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Running totals over all persisted inspections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionStats {
    pub total_packages: u64,
    pub passed_packages: u64,
    pub rejected_packages: u64,
    pub sealed_packages: u64,
    pub unsealed_packages: u64,
}

/// Package ids are derived from the wall clock (`PKG-<unix millis>`). No
/// collision check; acceptable for low-volume manual submission.
pub fn generate_package_id(now: DateTime<Utc>) -> String {
    format!("PKG-{}", now.timestamp_millis())
}
