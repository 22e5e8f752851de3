use std::sync::Arc;

use crate::application::ports::Transcoder;

use super::ffmpeg_transcoder::FfmpegTranscoder;
use super::symphonia_transcoder::SymphoniaTranscoder;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscoderProvider {
    Ffmpeg,
    Native,
}

pub struct TranscoderFactory;

impl TranscoderFactory {
    pub fn create(provider: TranscoderProvider, ffmpeg_path: &str) -> Arc<dyn Transcoder> {
        match provider {
            TranscoderProvider::Ffmpeg => Arc::new(FfmpegTranscoder::new(ffmpeg_path)),
            TranscoderProvider::Native => Arc::new(SymphoniaTranscoder),
        }
    }
}
