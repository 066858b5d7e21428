//! The layout-analysis seam.

use async_trait::async_trait;
use slidesnap_core::{Region, Result};

/// Segments one slide image into typed regions.
///
/// The production implementation calls a hosted vision model; tests and
/// embedders can substitute anything that yields regions.
#[async_trait]
pub trait LayoutAnalyzer: Send + Sync {
    /// Analyze a PNG-encoded slide image.
    async fn analyze(&self, png: &[u8]) -> Result<Vec<Region>>;
}
