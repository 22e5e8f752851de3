use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Idle,
    Fetching,
    Transcoding,
    Streaming,
    Assessing,
    Completed,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "IDLE",
            PipelineStage::Fetching => "FETCHING",
            PipelineStage::Transcoding => "TRANSCODING",
            PipelineStage::Streaming => "STREAMING",
            PipelineStage::Assessing => "ASSESSING",
            PipelineStage::Completed => "COMPLETED",
            PipelineStage::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Completed | PipelineStage::Failed)
    }

    pub fn can_advance_to(&self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        match (self, next) {
            (Idle, Fetching)
            | (Fetching, Transcoding)
            | (Transcoding, Streaming)
            | (Streaming, Assessing)
            | (Assessing, Completed) => true,
            (current, Failed) => !current.is_terminal(),
            _ => false,
        }
    }

    pub fn advance(self, next: PipelineStage) -> Result<PipelineStage, String> {
        if self.can_advance_to(next) {
            Ok(next)
        } else {
            Err(format!("illegal stage transition {} -> {}", self, next))
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
