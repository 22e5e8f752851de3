mod assessment_orchestrator;

pub use assessment_orchestrator::{AssessmentError, AssessmentOrchestrator, OrchestratorSettings};
