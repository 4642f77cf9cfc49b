use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::warn;
use thiserror::Error;

use tokio::time::Duration;

use crate::capture::{CaptureController, FrameSource};
use crate::classifier::Thresholds;
use crate::config::InspectionConfig;
use crate::db::Database;
use crate::models::{generate_package_id, InspectionRecord, NewInspection, SensorReading};
use crate::vision::{PackageAnalyzer, VisionVerdict};

use super::SharedSession;

/// Submission failures reported to the caller. Nothing here is fatal; the
/// session keeps its data so the operator can fix the gap and retry.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no captured image for this inspection")]
    MissingImage,
    #[error("sensor reading incomplete: temperature, weight and seal state are all required")]
    IncompleteReading,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Drives one inspection interaction: explicit capture-and-analyze, live
/// capture start/stop, and the final submit that turns the fused session
/// data into a persisted record.
pub struct InspectionController {
    session: SharedSession,
    db: Database,
    thresholds: Thresholds,
    capture: CaptureController,
}

impl InspectionController {
    pub fn new(db: Database, thresholds: Thresholds) -> Self {
        Self {
            session: SharedSession::new(),
            db,
            thresholds,
            capture: CaptureController::new(),
        }
    }

    pub fn with_capture(db: Database, thresholds: Thresholds, capture: CaptureController) -> Self {
        Self {
            session: SharedSession::new(),
            db,
            thresholds,
            capture,
        }
    }

    pub fn from_config(db: Database, config: &InspectionConfig) -> Self {
        Self::with_capture(
            db,
            config.thresholds.clone(),
            CaptureController::with_interval(Duration::from_millis(config.capture_interval_ms)),
        )
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub async fn start_live_capture(
        &mut self,
        frames: Arc<dyn FrameSource>,
        analyzer: Arc<dyn PackageAnalyzer>,
    ) {
        self.capture
            .start(self.session.clone(), frames, analyzer)
            .await;
    }

    pub async fn stop_live_capture(&mut self) -> Result<()> {
        self.capture.stop().await
    }

    /// Explicit capture path: store the frame, run one analysis, fold the
    /// verdict in. When the service is unreachable this degrades to a
    /// locally generated best-effort verdict (flagged as such) instead of
    /// failing; having some answer beats having none here.
    pub async fn analyze_capture(
        &self,
        analyzer: &dyn PackageAnalyzer,
        image: String,
    ) -> VisionVerdict {
        self.session.set_captured_image(Some(image.clone())).await;

        let verdict = match analyzer.analyze(&image).await {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!("vision service unavailable, using local fallback: {err}");
                VisionVerdict::fallback()
            }
        };

        self.session.apply_verdict(verdict.clone()).await;
        verdict
    }

    /// Fill the reading with simulated bench data.
    pub async fn simulate_sensor_data(&self) {
        self.session
            .set_manual_reading(SensorReading::simulate())
            .await;
    }

    /// Drop the captured image and verdict, keeping sensor fields.
    pub async fn retake(&self) {
        self.session.clear_capture().await;
    }

    /// Submit the current session as one inspection. Requires a captured
    /// image and a complete reading; on success the record is persisted
    /// (status and reason computed by the store) and the session resets for
    /// the next package.
    pub async fn submit(&self) -> Result<InspectionRecord, SubmitError> {
        let snapshot = self.session.snapshot().await;

        let image_data = snapshot.captured_image.ok_or(SubmitError::MissingImage)?;
        if !snapshot.reading.is_complete() {
            return Err(SubmitError::IncompleteReading);
        }

        let submission = NewInspection {
            package_id: generate_package_id(Utc::now()),
            // Presence checked above.
            temperature: snapshot.reading.temperature.unwrap_or_default(),
            weight: snapshot.reading.weight.unwrap_or_default(),
            is_sealed: snapshot.reading.sealed.unwrap_or_default(),
            image_data,
        };

        let record = self
            .db
            .insert_inspection(submission, self.thresholds.clone())
            .await?;

        self.session.reset().await;
        Ok(record)
    }
}
