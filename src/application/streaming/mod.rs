mod push_audio_stream;

pub use push_audio_stream::{
    PcmAudioStream, PushAudioStream, StreamAdapterError, StreamState, push_audio_stream,
};
