use std::sync::Arc;

use crate::application::ports::{
    AssessmentEngine, AssessmentEngineError, AudioFetcher, FetchError, MaterializeError,
    StagingStrategy, TranscodeError,
};
use crate::application::streaming::{PushAudioStream, StreamAdapterError, push_audio_stream};
use crate::domain::{AssessmentRequest, AssessmentResult, PcmAudio, PipelineStage, ValidationError};

/// Explicit pipeline tuning, passed in at construction.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorSettings {
    pub chunk_size_bytes: usize,
    pub buffer_chunks: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            // One second of 16 kHz mono s16le.
            chunk_size_bytes: 32_000,
            buffer_chunks: 16,
        }
    }
}

pub struct AssessmentOrchestrator {
    fetcher: Arc<dyn AudioFetcher>,
    staging: Arc<dyn StagingStrategy>,
    engine: Arc<dyn AssessmentEngine>,
    settings: OrchestratorSettings,
}

impl AssessmentOrchestrator {
    pub fn new(
        fetcher: Arc<dyn AudioFetcher>,
        staging: Arc<dyn StagingStrategy>,
        engine: Arc<dyn AssessmentEngine>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            fetcher,
            staging,
            engine,
            settings,
        }
    }

    /// Fetches `audio_url`, converts it to 16 kHz mono PCM and scores it
    /// against `reference_text`. Single attempt, no retries.
    #[tracing::instrument(skip_all, fields(audio_source = tracing::field::Empty))]
    pub async fn run_assessment(
        &self,
        reference_text: &str,
        audio_url: &str,
    ) -> Result<AssessmentResult, AssessmentError> {
        let request = AssessmentRequest::new(reference_text, audio_url).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected assessment request");
        })?;
        tracing::Span::current().record(
            "audio_source",
            tracing::field::display(&request.audio_source),
        );

        let mut stage = PipelineStage::Idle;
        let result = self.drive(&request, &mut stage).await;

        match &result {
            Ok(assessment) => {
                transition(&mut stage, PipelineStage::Completed);
                tracing::info!(
                    pronunciation = assessment.pronunciation_score,
                    accuracy = assessment.accuracy_score,
                    fluency = assessment.fluency_score,
                    completeness = assessment.completeness_score,
                    prosody = assessment.prosody_score,
                    "Assessment completed"
                );
            }
            Err(e) => {
                transition(&mut stage, PipelineStage::Failed);
                tracing::error!(failed_stage = %e.failed_stage(), error = %e, "Assessment failed");
            }
        }

        result
    }

    async fn drive(
        &self,
        request: &AssessmentRequest,
        stage: &mut PipelineStage,
    ) -> Result<AssessmentResult, AssessmentError> {
        transition(stage, PipelineStage::Fetching);
        let fetched = self
            .fetcher
            .fetch(&request.audio_source)
            .await
            .map_err(AssessmentError::Fetch)?;

        tracing::debug!(
            format = %fetched.format,
            content_length = ?fetched.content_length,
            "Remote audio opened"
        );

        transition(stage, PipelineStage::Transcoding);
        let pcm = self
            .staging
            .materialize(fetched)
            .await
            .map_err(AssessmentError::from)?;

        tracing::debug!(
            strategy = self.staging.name(),
            bytes = pcm.byte_len(),
            descriptor = %pcm.descriptor(),
            "Audio converted"
        );

        transition(stage, PipelineStage::Streaming);
        let (writer, reader) = push_audio_stream(self.settings.buffer_chunks);

        transition(stage, PipelineStage::Assessing);
        let (fed, assessed) = tokio::join!(
            feed(writer, &pcm, self.settings.chunk_size_bytes),
            self.engine.assess(&request.reference_text, reader),
        );

        let scores = match (fed, assessed) {
            (_, Err(e)) => return Err(AssessmentError::Engine(e)),
            (Err(e), Ok(_)) => return Err(AssessmentError::StreamAdapter(e)),
            (Ok(bytes), Ok(scores)) => {
                tracing::debug!(bytes = bytes, "Audio stream consumed by engine");
                scores
            }
        };

        AssessmentResult::new(request.reference_text.clone(), scores)
            .map_err(|e| AssessmentError::Engine(AssessmentEngineError::InvalidScores(e)))
    }
}

async fn feed(
    mut writer: PushAudioStream,
    pcm: &PcmAudio,
    chunk_size: usize,
) -> Result<u64, StreamAdapterError> {
    for chunk in pcm.chunks(chunk_size) {
        writer.write(chunk).await?;
    }
    writer.close().await
}

fn transition(stage: &mut PipelineStage, next: PipelineStage) {
    match stage.advance(next) {
        Ok(advanced) => {
            tracing::debug!(from = %stage, to = %advanced, "Pipeline stage transition");
            *stage = advanced;
        }
        Err(e) => tracing::warn!(error = %e, "Ignoring stage transition"),
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AssessmentError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("fetching: {0}")]
    Fetch(FetchError),
    #[error("transcoding: {0}")]
    Transcode(TranscodeError),
    #[error("streaming: {0}")]
    StreamAdapter(StreamAdapterError),
    #[error("assessment engine: {0}")]
    Engine(AssessmentEngineError),
}

impl AssessmentError {
    /// Stage from which the pipeline moved to `Failed`.
    pub fn failed_stage(&self) -> PipelineStage {
        match self {
            AssessmentError::Validation(_) => PipelineStage::Idle,
            AssessmentError::Fetch(_) => PipelineStage::Fetching,
            AssessmentError::Transcode(_) => PipelineStage::Transcoding,
            AssessmentError::StreamAdapter(_) => PipelineStage::Streaming,
            AssessmentError::Engine(_) => PipelineStage::Assessing,
        }
    }
}

impl From<MaterializeError> for AssessmentError {
    fn from(error: MaterializeError) -> Self {
        match error {
            MaterializeError::Fetch(e) => AssessmentError::Fetch(e),
            MaterializeError::Transcode(e) => AssessmentError::Transcode(e),
        }
    }
}
