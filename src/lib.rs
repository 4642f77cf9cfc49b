//! Sensor-fusion and classification core for a packaged-food quality
//! inspection station.
//!
//! A serial-style device streams temperature / weight / seal readings, a
//! camera feed is periodically analyzed by an external vision service, and
//! an explicit submit fuses everything into a pass/fail inspection record
//! with an explainable reason. The embedding presentation layer wires a
//! [`FrameSource`](capture::FrameSource) and a
//! [`PackageAnalyzer`](vision::PackageAnalyzer) in and drives an
//! [`InspectionController`](session::InspectionController).

pub mod capture;
pub mod classifier;
pub mod config;
pub mod db;
pub mod device;
pub mod models;
pub mod session;
pub mod utils;
pub mod vision;

pub use capture::{CaptureController, FrameSource};
pub use classifier::{classify, Thresholds, Verdict};
pub use config::InspectionConfig;
pub use db::Database;
pub use models::{
    InspectionRecord, InspectionStats, InspectionStatus, NewInspection, SensorReading,
};
pub use session::{InspectionController, SessionState, SharedSession, SubmitError};
pub use vision::{PackageAnalyzer, SealStatus, VisionClient, VisionError, VisionVerdict};

/// Initialize logging for the embedding process (reads RUST_LOG env var).
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
