use std::sync::Arc;

use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::session::SharedSession;
use crate::vision::PackageAnalyzer;

use super::FrameSource;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// Reference live-analysis period.
pub const CAPTURE_INTERVAL_MS: u64 = 800;
const ANALYSIS_TIMEOUT_SECS: u64 = 10;

/// Periodic live-analysis loop: capture a frame, send it to the vision
/// service, fold the verdict into the session.
///
/// Ticks are anchored to session start, not to analysis completion, and a
/// tick that would overlap an outstanding analysis is skipped outright; at
/// most one analysis call is in flight per session. Live failures are
/// swallowed; the previous verdict, if any, stays put.
///
/// Cancellation is observed between ticks, so an analysis in flight when the
/// session stops runs to completion and its verdict is then discarded
/// against the inactive session.
pub async fn capture_loop(
    session: SharedSession,
    frames: Arc<dyn FrameSource>,
    analyzer: Arc<dyn PackageAnalyzer>,
    interval: Duration,
    cancel_token: CancellationToken,
) {
    // The first analysis happens one period after start, matching the
    // explicit-capture-free warmup of the original feed.
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log_info!("capture loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let image = match frames.capture_frame() {
                    Ok(image) => image,
                    Err(err) => {
                        log_error!("frame capture failed: {err:?}");
                        continue;
                    }
                };

                session.set_analysis_in_flight(true).await;
                let outcome = time::timeout(
                    Duration::from_secs(ANALYSIS_TIMEOUT_SECS),
                    analyzer.analyze(&image),
                )
                .await;
                session.set_analysis_in_flight(false).await;

                match outcome {
                    Ok(Ok(verdict)) => {
                        if !session.apply_live_verdict(verdict).await {
                            log_info!("discarding live verdict for inactive session");
                        }
                    }
                    // Live mode favors availability: no user-facing error.
                    Ok(Err(err)) => log_info!("live analysis failed, ignoring: {err}"),
                    Err(_) => log_warn!("live analysis timeout (> {ANALYSIS_TIMEOUT_SECS}s)"),
                }
            }
        }
    }
}
