use std::io::{Cursor, ErrorKind};
use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use rubato::{FftFixedIn, Resampler};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioByteStream, MaterializeError, TranscodeError, Transcoder};
use crate::domain::{AudioFormat, PcmStreamDescriptor};

const RESAMPLER_BLOCK_FRAMES: usize = 1024;
const RESAMPLER_SUB_CHUNKS: usize = 2;

/// In-process conversion: symphonia decode, rubato resample, hound encode.
///
/// Input is always buffered in memory before decoding, so any container
/// symphonia can demux is accepted from a live stream too.
pub struct SymphoniaTranscoder;

#[async_trait]
impl Transcoder for SymphoniaTranscoder {
    fn name(&self) -> &'static str {
        "symphonia"
    }

    fn accepts_live_stream(&self, _format: AudioFormat) -> bool {
        true
    }

    async fn transcode_stream(
        &self,
        mut input: AudioByteStream,
        format: AudioFormat,
    ) -> Result<Vec<u8>, MaterializeError> {
        let mut data = Vec::new();
        while let Some(chunk) = input.next().await {
            data.extend_from_slice(&chunk?);
        }

        Ok(convert_blocking(data, format).await?)
    }

    async fn transcode_file(
        &self,
        input: &Path,
        output: &Path,
        format: AudioFormat,
    ) -> Result<(), TranscodeError> {
        let data = tokio::fs::read(input)
            .await
            .map_err(|e| TranscodeError::Io(format!("read {}: {}", input.display(), e)))?;

        let wav = convert_blocking(data, format).await?;

        tokio::fs::write(output, wav)
            .await
            .map_err(|e| TranscodeError::Io(format!("write {}: {}", output.display(), e)))
    }
}

async fn convert_blocking(data: Vec<u8>, format: AudioFormat) -> Result<Vec<u8>, TranscodeError> {
    tokio::task::spawn_blocking(move || {
        let samples = render_canonical(data, format)?;
        encode_wav(&samples)
    })
    .await
    .map_err(|e| TranscodeError::DecodingFailed(format!("decoder task: {}", e)))?
}

/// Decodes the default track and converts it, packet by packet, to mono
/// samples at the canonical rate.
fn render_canonical(data: Vec<u8>, format: AudioFormat) -> Result<Vec<f32>, TranscodeError> {
    let target = PcmStreamDescriptor::CANONICAL;
    let mut track = MonoTrack::open(data, format)?;
    let mut converter = RateConverter::new(track.sample_rate, target.sample_rate)?;

    let mut block = Vec::new();
    while track.read_into(&mut block)? {
        converter.push(&block)?;
        block.clear();
    }

    let source_frames = converter.input_frames;
    let mono = converter.finish()?;
    if mono.is_empty() {
        return Err(TranscodeError::DecodingFailed(
            "no audio samples decoded".to_string(),
        ));
    }

    tracing::debug!(
        source_rate = track.sample_rate,
        source_frames = source_frames,
        output_frames = mono.len(),
        target = %target,
        "Audio rendered to canonical PCM"
    );

    Ok(mono)
}

fn decoding(context: &str, error: SymphoniaError) -> TranscodeError {
    TranscodeError::DecodingFailed(format!("{}: {}", context, error))
}

/// Packets of one audio track, decoded and folded down to mono.
struct MonoTrack {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    sample_rate: u32,
    scratch: Option<SampleBuffer<f32>>,
}

impl MonoTrack {
    fn open(data: Vec<u8>, format: AudioFormat) -> Result<Self, TranscodeError> {
        let source = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

        let mut hint = Hint::new();
        if format != AudioFormat::Unknown {
            hint.with_extension(format.extension());
        }

        let reader = symphonia::default::get_probe()
            .format(
                &hint,
                source,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| decoding("probe", e))?
            .format;

        let track = reader
            .default_track()
            .ok_or_else(|| TranscodeError::DecodingFailed("no audio track found".to_string()))?;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| TranscodeError::DecodingFailed("unknown sample rate".to_string()))?;
        let track_id = track.id;

        let decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| decoding("codec", e))?;

        Ok(Self {
            reader,
            decoder,
            track_id,
            sample_rate,
            scratch: None,
        })
    }

    /// Appends the next decoded packet to `mono`. Returns `false` once the
    /// track is exhausted.
    fn read_into(&mut self, mono: &mut Vec<f32>) -> Result<bool, TranscodeError> {
        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => {
                    return Ok(false);
                }
                Err(e) => return Err(decoding("read packet", e)),
            };
            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!(error = %e, "Dropping undecodable packet");
                    continue;
                }
                Err(e) => return Err(decoding("decode packet", e)),
            };

            let frames = decoded.frames();
            if frames == 0 {
                continue;
            }
            let spec = *decoded.spec();
            let channels = spec.channels.count().max(1);

            if self
                .scratch
                .as_ref()
                .is_none_or(|buffer| buffer.capacity() < frames * channels)
            {
                self.scratch = Some(SampleBuffer::new(frames as u64, spec));
            }
            let Some(scratch) = self.scratch.as_mut() else {
                continue;
            };
            scratch.copy_interleaved_ref(decoded);

            let weight = 1.0 / channels as f32;
            mono.extend(
                scratch
                    .samples()
                    .chunks_exact(channels)
                    .map(|frame| frame.iter().sum::<f32>() * weight),
            );
            return Ok(true);
        }
    }
}

/// Block-wise sample-rate conversion of a mono signal.
///
/// Output is trimmed by the resampler's delay and cut to the input's
/// duration, so sample `n` of the output lines up with time `n / target`
/// of the input.
struct RateConverter {
    resampler: Option<FftFixedIn<f32>>,
    source_rate: u32,
    target_rate: u32,
    pending: Vec<f32>,
    output: Vec<f32>,
    input_frames: usize,
}

impl RateConverter {
    fn new(source_rate: u32, target_rate: u32) -> Result<Self, TranscodeError> {
        let resampler = if source_rate == target_rate {
            None
        } else {
            let resampler = FftFixedIn::<f32>::new(
                source_rate as usize,
                target_rate as usize,
                RESAMPLER_BLOCK_FRAMES,
                RESAMPLER_SUB_CHUNKS,
                1,
            )
            .map_err(|e| TranscodeError::DecodingFailed(format!("resampler init: {}", e)))?;
            Some(resampler)
        };

        Ok(Self {
            resampler,
            source_rate,
            target_rate,
            pending: Vec::new(),
            output: Vec::new(),
            input_frames: 0,
        })
    }

    fn push(&mut self, samples: &[f32]) -> Result<(), TranscodeError> {
        self.input_frames += samples.len();

        let Some(resampler) = self.resampler.as_mut() else {
            self.output.extend_from_slice(samples);
            return Ok(());
        };

        self.pending.extend_from_slice(samples);
        let mut consumed = 0;
        while self.pending.len() - consumed >= resampler.input_frames_next() {
            let needed = resampler.input_frames_next();
            let block = &self.pending[consumed..consumed + needed];
            let converted = resampler.process(&[block], None).map_err(resample_failed)?;
            if let Some(channel) = converted.first() {
                self.output.extend_from_slice(channel);
            }
            consumed += needed;
        }
        self.pending.drain(..consumed);

        Ok(())
    }

    fn finish(mut self) -> Result<Vec<f32>, TranscodeError> {
        let Some(mut resampler) = self.resampler.take() else {
            return Ok(self.output);
        };
        if self.input_frames == 0 {
            return Ok(Vec::new());
        }

        let expected = ((self.input_frames as u64 * self.target_rate as u64
            + self.source_rate as u64 / 2)
            / self.source_rate as u64) as usize;
        let delay = resampler.output_delay();

        if !self.pending.is_empty() {
            let tail = [self.pending.as_slice()];
            let converted = resampler
                .process_partial(Some(&tail[..]), None)
                .map_err(resample_failed)?;
            if let Some(channel) = converted.first() {
                self.output.extend_from_slice(channel);
            }
        }

        while self.output.len() < delay + expected {
            let converted = resampler
                .process_partial(None::<&[Vec<f32>]>, None)
                .map_err(resample_failed)?;
            match converted.first() {
                Some(channel) if !channel.is_empty() => self.output.extend_from_slice(channel),
                _ => break,
            }
        }

        let mut aligned = self.output.split_off(delay.min(self.output.len()));
        aligned.truncate(expected);
        Ok(aligned)
    }
}

fn resample_failed(error: rubato::ResampleError) -> TranscodeError {
    TranscodeError::DecodingFailed(format!("resample: {}", error))
}

fn encode_wav(samples: &[f32]) -> Result<Vec<u8>, TranscodeError> {
    let spec = PcmStreamDescriptor::CANONICAL.hound_spec();
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));

    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| TranscodeError::Io(format!("wav header: {}", e)))?;
        for &sample in samples {
            let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
            writer
                .write_sample(scaled)
                .map_err(|e| TranscodeError::Io(format!("wav sample: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| TranscodeError::Io(format!("wav finalize: {}", e)))?;
    }

    Ok(cursor.into_inner())
}
