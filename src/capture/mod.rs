pub mod controller;
pub mod loop_worker;

use anyhow::Result;

pub use controller::CaptureController;

/// Port for frame acquisition. Implementations hand back the current frame
/// as a base64/data-URL string ready for the vision endpoint; the core never
/// looks inside the image.
pub trait FrameSource: Send + Sync {
    fn capture_frame(&self) -> Result<String>;
}
