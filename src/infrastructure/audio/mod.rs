mod ffmpeg_transcoder;
mod symphonia_transcoder;
mod transcoder_factory;

pub use ffmpeg_transcoder::{
    FfmpegTranscoder, check_ffmpeg_binary, conversion_args, patch_wav_sizes,
};
pub use symphonia_transcoder::SymphoniaTranscoder;
pub use transcoder_factory::{TranscoderFactory, TranscoderProvider};
