mod assessment_engine;
mod audio_fetcher;
mod staging_strategy;
mod transcoder;

pub use assessment_engine::{AssessmentEngine, AssessmentEngineError};
pub use audio_fetcher::{AudioByteStream, AudioFetcher, FetchError, FetchedAudio};
pub use staging_strategy::{MaterializeError, StagingStrategy};
pub use transcoder::{TranscodeError, Transcoder};
