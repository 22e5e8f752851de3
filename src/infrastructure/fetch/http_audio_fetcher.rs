use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::application::ports::{AudioFetcher, FetchError, FetchedAudio};
use crate::domain::{AudioFormat, AudioSource};

/// Streams a remote audio body over HTTP(S). Single attempt per call.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
    max_bytes: Option<u64>,
}

impl HttpAudioFetcher {
    pub fn new(client: reqwest::Client, max_bytes: Option<u64>) -> Self {
        Self { client, max_bytes }
    }
}

impl Default for HttpAudioFetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), None)
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    async fn fetch(&self, source: &AudioSource) -> Result<FetchedAudio, FetchError> {
        tracing::debug!(url = %source, "Fetching remote audio");

        let response = self
            .client
            .get(source.url().clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("{}: {}", source, e.without_url())))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: source.to_string(),
            });
        }

        let content_length = response.content_length();
        if let (Some(limit), Some(declared)) = (self.max_bytes, content_length) {
            if declared > limit {
                return Err(FetchError::TooLarge { limit_bytes: limit });
            }
        }

        let announced = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(AudioFormat::from_mime)
            .unwrap_or(AudioFormat::Unknown);
        let format = source.format_hint().refine(announced);

        let limit = self.max_bytes;
        let stream = response
            .bytes_stream()
            .scan(0u64, move |received, chunk| {
                let item = match chunk {
                    Ok(bytes) => {
                        *received += bytes.len() as u64;
                        match limit {
                            Some(limit) if *received > limit => {
                                Err(FetchError::TooLarge { limit_bytes: limit })
                            }
                            _ => Ok(bytes),
                        }
                    }
                    Err(e) => Err(FetchError::Interrupted(e.without_url().to_string())),
                };
                futures::future::ready(Some(item))
            })
            .boxed();

        Ok(FetchedAudio {
            stream,
            format,
            content_length,
        })
    }
}
