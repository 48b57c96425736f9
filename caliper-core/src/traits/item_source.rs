use async_trait::async_trait;

use crate::errors::CaliperResult;
use crate::item::Item;

/// The external item repository feeding the calibration loop.
#[async_trait]
pub trait IItemSource: Send + Sync {
    /// Pull up to `size` items. An empty batch means the source is
    /// exhausted; what to do about that is the caller's concern.
    async fn next_batch(&self, size: usize) -> CaliperResult<Vec<Item>>;
}
