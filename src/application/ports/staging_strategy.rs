use async_trait::async_trait;

use super::{FetchError, FetchedAudio, TranscodeError};
use crate::domain::PcmAudio;

/// Moves fetched bytes through a transcoder and owns any storage it needs
/// on the way. Temporary artifacts never outlive `materialize`.
#[async_trait]
pub trait StagingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn materialize(&self, fetched: FetchedAudio) -> Result<PcmAudio, MaterializeError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MaterializeError {
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),
    #[error("transcode: {0}")]
    Transcode(#[from] TranscodeError),
}
