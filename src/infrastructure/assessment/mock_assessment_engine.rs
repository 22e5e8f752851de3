use crate::application::ports::{AssessmentEngine, AssessmentEngineError};
use crate::application::streaming::PcmAudioStream;
use crate::domain::EngineScores;

/// Deterministic engine: drains the stream and returns fixed scores.
pub struct MockAssessmentEngine {
    scores: EngineScores,
}

impl MockAssessmentEngine {
    pub fn new(scores: EngineScores) -> Self {
        Self { scores }
    }
}

impl Default for MockAssessmentEngine {
    fn default() -> Self {
        Self::new(EngineScores {
            pronunciation: 87.5,
            accuracy: 90.0,
            fluency: 85.0,
            completeness: 100.0,
            prosody: 78.4,
        })
    }
}

#[async_trait::async_trait]
impl AssessmentEngine for MockAssessmentEngine {
    async fn assess(
        &self,
        _reference_text: &str,
        audio: PcmAudioStream,
    ) -> Result<EngineScores, AssessmentEngineError> {
        let received = audio
            .read_to_end()
            .await
            .map_err(|e| AssessmentEngineError::ApiRequestFailed(format!("audio stream: {}", e)))?;

        if received.is_empty() {
            return Err(AssessmentEngineError::NotRecognized("NoMatch".to_string()));
        }

        Ok(self.scores)
    }
}
