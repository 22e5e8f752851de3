//! Push-style audio stream handed to assessment engines.
//!
//! The producer half ([`PushAudioStream`]) writes chunks and finishes with
//! exactly one `close` or `fail`; both consume the writer, so nothing can be
//! written afterwards. The consumer half ([`PcmAudioStream`]) is a plain
//! `futures::Stream` that moves from `Open` to `Closed` on a clean close, or
//! to `Failed` when the producer failed or went away without closing.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use tokio::sync::mpsc;

use crate::domain::PcmStreamDescriptor;

enum Frame {
    Data(Bytes),
    Failed(StreamAdapterError),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Open,
    Closed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamAdapterError {
    #[error("consumer closed the stream early")]
    ConsumerClosed,
    #[error("producer went away before closing the stream")]
    Truncated,
    #[error("upstream failed: {0}")]
    Upstream(String),
}

/// Creates a connected writer/reader pair buffering at most `capacity` chunks.
pub fn push_audio_stream(capacity: usize) -> (PushAudioStream, PcmAudioStream) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (
        PushAudioStream {
            sender,
            written_bytes: 0,
        },
        PcmAudioStream {
            receiver,
            state: StreamState::Open,
        },
    )
}

pub struct PushAudioStream {
    sender: mpsc::Sender<Frame>,
    written_bytes: u64,
}

impl PushAudioStream {
    pub async fn write(&mut self, chunk: Bytes) -> Result<(), StreamAdapterError> {
        let len = chunk.len() as u64;
        self.sender
            .send(Frame::Data(chunk))
            .await
            .map_err(|_| StreamAdapterError::ConsumerClosed)?;
        self.written_bytes += len;
        Ok(())
    }

    pub fn written_bytes(&self) -> u64 {
        self.written_bytes
    }

    /// Signals end-of-data. Returns the total number of bytes written.
    pub async fn close(self) -> Result<u64, StreamAdapterError> {
        self.sender
            .send(Frame::End)
            .await
            .map_err(|_| StreamAdapterError::ConsumerClosed)?;
        Ok(self.written_bytes)
    }

    /// Closes the stream with an error the consumer will observe.
    pub async fn fail(self, error: StreamAdapterError) {
        // A consumer that is already gone has nothing left to notify.
        let _ = self.sender.send(Frame::Failed(error)).await;
    }
}

pub struct PcmAudioStream {
    receiver: mpsc::Receiver<Frame>,
    state: StreamState,
}

impl PcmAudioStream {
    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn descriptor(&self) -> PcmStreamDescriptor {
        PcmStreamDescriptor::CANONICAL
    }

    /// Drains the stream into a single buffer, failing if it did not close cleanly.
    pub async fn read_to_end(mut self) -> Result<Vec<u8>, StreamAdapterError> {
        use futures::StreamExt;

        let mut buffer = Vec::new();
        while let Some(chunk) = self.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer)
    }
}

impl Stream for PcmAudioStream {
    type Item = Result<Bytes, StreamAdapterError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.state != StreamState::Open {
            return Poll::Ready(None);
        }

        match self.receiver.poll_recv(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(Frame::Data(chunk))) => Poll::Ready(Some(Ok(chunk))),
            Poll::Ready(Some(Frame::End)) => {
                self.state = StreamState::Closed;
                self.receiver.close();
                Poll::Ready(None)
            }
            Poll::Ready(Some(Frame::Failed(error))) => {
                self.state = StreamState::Failed;
                self.receiver.close();
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(None) => {
                self.state = StreamState::Failed;
                Poll::Ready(Some(Err(StreamAdapterError::Truncated)))
            }
        }
    }
}
