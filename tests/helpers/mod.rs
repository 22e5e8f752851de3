#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use futures::StreamExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use eloquence::application::ports::{
    AssessmentEngine, AssessmentEngineError, AudioByteStream, MaterializeError, TranscodeError,
    Transcoder,
};
use eloquence::application::streaming::PcmAudioStream;
use eloquence::domain::{AudioFormat, EngineScores};

pub fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

pub fn build_float_wav(sample_rate: u32, channels: u16, samples: &[f32]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Interleaved sine tone, identical on every channel.
pub fn tone(sample_rate: u32, channels: u16, frames: usize, frequency: f32) -> Vec<i16> {
    (0..frames)
        .flat_map(|i| {
            let t = i as f32 / sample_rate as f32;
            let value = (t * frequency * std::f32::consts::TAU).sin() * 0.4 * i16::MAX as f32;
            std::iter::repeat_n(value as i16, channels as usize)
        })
        .collect()
}

pub fn canonical_wav(frames: usize) -> Vec<u8> {
    build_wav(16_000, 1, &vec![0i16; frames])
}

pub fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

/// Serves each `(path, body, content_type)` with status 200; anything else is 404.
pub async fn start_audio_server(
    files: Vec<(&'static str, Vec<u8>, &'static str)>,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let mut app = Router::new();
    for (path, body, content_type) in files {
        app = app.route(
            path,
            get(move || {
                let body = body.clone();
                async move { ([(CONTENT_TYPE, content_type)], body).into_response() }
            }),
        );
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

/// A port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/audio.wav", addr)
}

/// Treats its input as already canonical and copies it through unchanged.
#[derive(Default)]
pub struct CopyTranscoder {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Transcoder for CopyTranscoder {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn accepts_live_stream(&self, format: AudioFormat) -> bool {
        !format.requires_seeking()
    }

    async fn transcode_stream(
        &self,
        mut input: AudioByteStream,
        _format: AudioFormat,
    ) -> Result<Vec<u8>, MaterializeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut data = Vec::new();
        while let Some(chunk) = input.next().await {
            data.extend_from_slice(&chunk?);
        }
        Ok(data)
    }

    async fn transcode_file(
        &self,
        input: &Path,
        output: &Path,
        _format: AudioFormat,
    ) -> Result<(), TranscodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::copy(input, output)
            .await
            .map(|_| ())
            .map_err(|e| TranscodeError::Io(e.to_string()))
    }
}

/// Writes a partial output file, then fails like a crashed converter.
#[derive(Default)]
pub struct FailingTranscoder {
    pub calls: AtomicUsize,
}

impl FailingTranscoder {
    fn failure() -> TranscodeError {
        TranscodeError::ProcessFailed {
            exit_code: Some(1),
            stderr: "Invalid data found when processing input".to_string(),
            stdout: String::new(),
        }
    }
}

#[async_trait]
impl Transcoder for FailingTranscoder {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn accepts_live_stream(&self, _format: AudioFormat) -> bool {
        false
    }

    async fn transcode_stream(
        &self,
        _input: AudioByteStream,
        _format: AudioFormat,
    ) -> Result<Vec<u8>, MaterializeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Self::failure().into())
    }

    async fn transcode_file(
        &self,
        _input: &Path,
        output: &Path,
        _format: AudioFormat,
    ) -> Result<(), TranscodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::write(output, b"RIFF").await.unwrap();
        Err(Self::failure())
    }
}

/// Drains the stream and scores by received length, so different inputs
/// produce different results.
#[derive(Default)]
pub struct CountingEngine {
    pub calls: AtomicUsize,
}

pub fn scores_for_length(len: usize) -> EngineScores {
    let score = (len / 1_000) as f64;
    EngineScores {
        pronunciation: score,
        accuracy: score,
        fluency: 50.0,
        completeness: 100.0,
        prosody: 75.0,
    }
}

#[async_trait]
impl AssessmentEngine for CountingEngine {
    async fn assess(
        &self,
        _reference_text: &str,
        audio: PcmAudioStream,
    ) -> Result<EngineScores, AssessmentEngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let received = audio
            .read_to_end()
            .await
            .map_err(|e| AssessmentEngineError::ApiRequestFailed(e.to_string()))?;
        Ok(scores_for_length(received.len()))
    }
}
