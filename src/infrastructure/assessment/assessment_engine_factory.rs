use std::sync::Arc;

use crate::application::ports::{AssessmentEngine, AssessmentEngineError};

use super::azure_pronunciation_engine::AzurePronunciationEngine;
use super::mock_assessment_engine::MockAssessmentEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssessmentProvider {
    Azure,
    Mock,
}

pub struct AssessmentEngineFactory;

impl AssessmentEngineFactory {
    pub fn create(
        provider: AssessmentProvider,
        api_key: &str,
        region: &str,
        language: &str,
        base_url: Option<&str>,
    ) -> Result<Arc<dyn AssessmentEngine>, AssessmentEngineError> {
        match provider {
            AssessmentProvider::Azure => {
                if api_key.is_empty() {
                    return Err(AssessmentEngineError::ApiRequestFailed(
                        "API key required for Azure speech".to_string(),
                    ));
                }
                let engine = AzurePronunciationEngine::new(api_key, region, language, base_url);
                Ok(Arc::new(engine))
            }
            AssessmentProvider::Mock => Ok(Arc::new(MockAssessmentEngine::default())),
        }
    }
}
