use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::{AudioFormat, AudioSource};

pub type AudioByteStream = BoxStream<'static, Result<Bytes, FetchError>>;

/// An opened remote audio body. Dropping `stream` aborts the transfer.
pub struct FetchedAudio {
    pub stream: AudioByteStream,
    pub format: AudioFormat,
    pub content_length: Option<u64>,
}

impl std::fmt::Debug for FetchedAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedAudio")
            .field("format", &self.format)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, source: &AudioSource) -> Result<FetchedAudio, FetchError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("transport failed: {0}")]
    Transport(String),
    #[error("remote returned status {status}: {url}")]
    Status { status: u16, url: String },
    #[error("transfer interrupted: {0}")]
    Interrupted(String),
    #[error("audio exceeds the {limit_bytes} byte limit")]
    TooLarge { limit_bytes: u64 },
}
