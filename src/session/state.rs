use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::SensorReading;
use crate::vision::VisionVerdict;

/// Everything an inspection interaction accumulates before submit: the
/// fused reading, the last captured frame, the last vision verdict and the
/// connection/activity flags. Reset to an empty reading on submit or retake.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub reading: SensorReading,
    pub captured_image: Option<String>,
    pub last_verdict: Option<VisionVerdict>,
    pub device_connected: bool,
    pub capture_active: bool,
    pub analysis_in_flight: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the inspection-in-progress fields. Connection and capture
    /// flags describe hardware, not the current package, so they survive.
    pub fn reset(&mut self) {
        self.reading = SensorReading::new();
        self.captured_image = None;
        self.last_verdict = None;
        self.analysis_in_flight = false;
    }

    /// Fold a vision verdict in. The verdict's seal flag is authoritative
    /// only while a package was actually detected; otherwise the existing
    /// flag (manual or device-sourced) is retained. A locally generated
    /// fallback applies its seal flag too; that is the explicit-capture
    /// availability trade-off.
    pub fn apply_verdict(&mut self, verdict: VisionVerdict) {
        if verdict.package_detected || verdict.fallback {
            self.reading.sealed = Some(verdict.sealed);
        }
        self.last_verdict = Some(verdict);
    }
}

/// Handle to the single session aggregate. All writers (device reader,
/// capture loop, explicit actions) go through these accessors, one mutation
/// at a time, so no field is ever observed half-updated.
#[derive(Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.clone()
    }

    pub async fn apply_partial_reading(&self, partial: &SensorReading) {
        self.inner.lock().await.reading.merge(partial);
    }

    pub async fn set_manual_reading(&self, reading: SensorReading) {
        let mut state = self.inner.lock().await;
        state.reading = reading;
    }

    pub async fn set_captured_image(&self, image: Option<String>) {
        self.inner.lock().await.captured_image = image;
    }

    /// Discard the captured frame together with the verdict derived from it.
    /// Sensor fields stay; they came from the device, not the frame.
    pub async fn clear_capture(&self) {
        let mut state = self.inner.lock().await;
        state.captured_image = None;
        state.last_verdict = None;
    }

    /// Apply only if live capture is still active: an analysis that was in
    /// flight when the session stopped completes but is discarded here.
    pub async fn apply_live_verdict(&self, verdict: VisionVerdict) -> bool {
        let mut state = self.inner.lock().await;
        if !state.capture_active {
            return false;
        }
        state.apply_verdict(verdict);
        true
    }

    pub async fn apply_verdict(&self, verdict: VisionVerdict) {
        self.inner.lock().await.apply_verdict(verdict);
    }

    pub async fn set_device_connected(&self, connected: bool) {
        self.inner.lock().await.device_connected = connected;
    }

    pub async fn set_capture_active(&self, active: bool) {
        self.inner.lock().await.capture_active = active;
    }

    pub async fn is_capture_active(&self) -> bool {
        self.inner.lock().await.capture_active
    }

    pub async fn set_analysis_in_flight(&self, in_flight: bool) {
        self.inner.lock().await.analysis_in_flight = in_flight;
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }
}
