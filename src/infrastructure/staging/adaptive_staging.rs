use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FetchedAudio, MaterializeError, StagingStrategy, Transcoder};
use crate::domain::PcmAudio;

use super::disk_staging::DiskStaging;
use super::in_memory_staging::InMemoryStaging;

/// Chooses per request: the in-memory pipe when the transcoder can read the
/// format from a live stream, disk staging otherwise.
pub struct AdaptiveStaging {
    transcoder: Arc<dyn Transcoder>,
    in_memory: InMemoryStaging,
    disk: DiskStaging,
}

impl AdaptiveStaging {
    pub fn new(transcoder: Arc<dyn Transcoder>, dir: PathBuf) -> Self {
        Self {
            in_memory: InMemoryStaging::new(Arc::clone(&transcoder)),
            disk: DiskStaging::new(Arc::clone(&transcoder), dir),
            transcoder,
        }
    }

    fn select(&self, fetched: &FetchedAudio) -> &dyn StagingStrategy {
        if self.transcoder.accepts_live_stream(fetched.format) {
            &self.in_memory
        } else {
            &self.disk
        }
    }
}

#[async_trait]
impl StagingStrategy for AdaptiveStaging {
    fn name(&self) -> &'static str {
        "auto"
    }

    async fn materialize(&self, fetched: FetchedAudio) -> Result<PcmAudio, MaterializeError> {
        let strategy = self.select(&fetched);
        tracing::debug!(
            format = %fetched.format,
            transcoder = self.transcoder.name(),
            strategy = strategy.name(),
            "Selected staging strategy"
        );
        strategy.materialize(fetched).await
    }
}
