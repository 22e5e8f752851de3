mod assessment_engine_factory;
mod azure_pronunciation_engine;
mod mock_assessment_engine;

pub use assessment_engine_factory::{AssessmentEngineFactory, AssessmentProvider};
pub use azure_pronunciation_engine::{AzurePronunciationEngine, assessment_header};
pub use mock_assessment_engine::MockAssessmentEngine;
