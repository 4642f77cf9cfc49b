use tokio::sync::mpsc;

use crate::session::SharedSession;

use super::decoder::LineDecoder;
use super::parser::parse_line;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Consume text chunks from an open device connection and merge whatever
/// they contain into the session reading.
///
/// The channel sender side is the connection owner: dropping it means the
/// device disconnected, at which point the connected flag is cleared and the
/// task ends cleanly. Runs independently of the capture loop; both only
/// touch the session through its async accessors.
pub async fn run_device_reader(session: SharedSession, mut chunks: mpsc::Receiver<String>) {
    session.set_device_connected(true).await;
    log_info!("device reader started");

    let mut decoder = LineDecoder::new();

    while let Some(chunk) = chunks.recv().await {
        for line in decoder.push_chunk(&chunk) {
            let partial = parse_line(&line);
            if partial.is_empty() {
                continue;
            }
            log_info!("device line {line:?} -> {partial:?}");
            session.apply_partial_reading(&partial).await;
        }
    }

    if let Some(residue) = decoder.finish() {
        log_info!("discarding unterminated device residue: {residue:?}");
    }

    session.set_device_connected(false).await;
    log_info!("device reader stopped");
}
