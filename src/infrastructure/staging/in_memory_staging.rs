use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    FetchedAudio, MaterializeError, StagingStrategy, TranscodeError, Transcoder,
};
use crate::domain::PcmAudio;

/// Pipes the fetched body straight into the transcoder; nothing touches disk.
pub struct InMemoryStaging {
    transcoder: Arc<dyn Transcoder>,
}

impl InMemoryStaging {
    pub fn new(transcoder: Arc<dyn Transcoder>) -> Self {
        Self { transcoder }
    }
}

#[async_trait]
impl StagingStrategy for InMemoryStaging {
    fn name(&self) -> &'static str {
        "in_memory"
    }

    async fn materialize(&self, fetched: FetchedAudio) -> Result<PcmAudio, MaterializeError> {
        let wav = self
            .transcoder
            .transcode_stream(fetched.stream, fetched.format)
            .await?;

        PcmAudio::from_wav(wav)
            .map_err(|e| TranscodeError::NonConformingOutput(e).into())
    }
}
