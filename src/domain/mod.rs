mod assessment_request;
mod assessment_result;
mod audio_format;
mod audio_source;
mod pcm_audio;
mod pcm_stream_descriptor;
mod pipeline_stage;
mod staging_token;

pub use assessment_request::{AssessmentRequest, ValidationError};
pub use assessment_result::{AssessmentResult, EngineScores, MAX_SCORE, MIN_SCORE};
pub use audio_format::AudioFormat;
pub use audio_source::AudioSource;
pub use pcm_audio::PcmAudio;
pub use pcm_stream_descriptor::{Container, PcmStreamDescriptor, SampleCodec};
pub use pipeline_stage::PipelineStage;
pub use staging_token::StagingToken;
