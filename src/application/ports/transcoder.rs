use std::path::Path;

use async_trait::async_trait;

use super::{AudioByteStream, MaterializeError};
use crate::domain::AudioFormat;

/// Converts arbitrary input audio into 16-bit mono 16 kHz WAV.
#[async_trait]
pub trait Transcoder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether `transcode_stream` can consume this format from a live,
    /// non-seekable pipe.
    fn accepts_live_stream(&self, format: AudioFormat) -> bool;

    async fn transcode_stream(
        &self,
        input: AudioByteStream,
        format: AudioFormat,
    ) -> Result<Vec<u8>, MaterializeError>;

    async fn transcode_file(
        &self,
        input: &Path,
        output: &Path,
        format: AudioFormat,
    ) -> Result<(), TranscodeError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TranscodeError {
    #[error("conversion tool unavailable: {0}")]
    ToolUnavailable(String),
    #[error("conversion process exited with code {exit_code:?}: {stderr}")]
    ProcessFailed {
        exit_code: Option<i32>,
        stderr: String,
        stdout: String,
    },
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("output does not match the pcm profile: {0}")]
    NonConformingOutput(String),
    #[error("staging io: {0}")]
    Io(String),
}
