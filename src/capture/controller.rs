use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::session::SharedSession;
use crate::vision::PackageAnalyzer;

use super::loop_worker::{capture_loop, CAPTURE_INTERVAL_MS};
use super::FrameSource;

/// Owns the live-analysis loop for one session: start/stop with a
/// cancellation token, timer resource released on every exit path.
pub struct CaptureController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    session: Option<SharedSession>,
    interval: Duration,
}

impl CaptureController {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(CAPTURE_INTERVAL_MS))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            handle: None,
            cancel_token: None,
            session: None,
            interval,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Begin periodic live analysis. A no-op if already active.
    pub async fn start(
        &mut self,
        session: SharedSession,
        frames: Arc<dyn FrameSource>,
        analyzer: Arc<dyn PackageAnalyzer>,
    ) {
        if self.handle.is_some() {
            return;
        }

        session.set_capture_active(true).await;

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(capture_loop(
            session.clone(),
            frames,
            analyzer,
            self.interval,
            cancel_token.clone(),
        ));

        info!("live capture started (interval {:?})", self.interval);
        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.session = Some(session);
    }

    /// Stop the loop and wait for it to wind down. An analysis already in
    /// flight completes first; its verdict is discarded because the
    /// capture-active flag drops before the cancel fires. Safe to call when
    /// already stopped.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            session.set_capture_active(false).await;
        }

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("capture loop task failed to join")?;
            info!("live capture stopped");
        }

        Ok(())
    }
}

impl Default for CaptureController {
    fn default() -> Self {
        Self::new()
    }
}
