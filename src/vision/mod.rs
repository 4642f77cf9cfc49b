pub mod client;
pub mod verdict;

use async_trait::async_trait;

pub use client::{VisionClient, VisionError};
pub use verdict::{SealStatus, VisionVerdict};

/// Port for the vision endpoint so the capture loop and the explicit
/// analyze path can run against a mock in tests.
#[async_trait]
pub trait PackageAnalyzer: Send + Sync {
    async fn analyze(&self, image: &str) -> Result<VisionVerdict, VisionError>;
}
