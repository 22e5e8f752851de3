use async_trait::async_trait;

use crate::application::streaming::PcmAudioStream;
use crate::domain::EngineScores;

#[async_trait]
pub trait AssessmentEngine: Send + Sync {
    /// Consumes `audio` until it closes and scores it against `reference_text`.
    async fn assess(
        &self,
        reference_text: &str,
        audio: PcmAudioStream,
    ) -> Result<EngineScores, AssessmentEngineError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentEngineError {
    #[error("speech not recognized: {0}")]
    NotRecognized(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid scores: {0}")]
    InvalidScores(String),
}
