use std::fmt;
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCodec {
    PcmS16Le,
    Other { bits_per_sample: u16, float: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Wav,
}

/// Audio profile of a PCM payload. Every transcoder output must equal
/// [`PcmStreamDescriptor::CANONICAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmStreamDescriptor {
    pub codec: SampleCodec,
    pub channels: u16,
    pub sample_rate: u32,
    pub container: Container,
}

impl PcmStreamDescriptor {
    pub const CANONICAL: Self = Self {
        codec: SampleCodec::PcmS16Le,
        channels: 1,
        sample_rate: 16_000,
        container: Container::Wav,
    };

    pub const BITS_PER_SAMPLE: u16 = 16;

    /// Reads the descriptor from a WAV header. Sample data is not decoded.
    pub fn inspect_wav(bytes: &[u8]) -> Result<Self, String> {
        let reader =
            hound::WavReader::new(Cursor::new(bytes)).map_err(|e| format!("wav header: {}", e))?;
        let spec = reader.spec();

        let codec = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, Self::BITS_PER_SAMPLE) => SampleCodec::PcmS16Le,
            (format, bits) => SampleCodec::Other {
                bits_per_sample: bits,
                float: format == hound::SampleFormat::Float,
            },
        };

        Ok(Self {
            codec,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            container: Container::Wav,
        })
    }

    pub fn hound_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: Self::BITS_PER_SAMPLE,
            sample_format: hound::SampleFormat::Int,
        }
    }

    /// MIME type understood by speech services for this profile.
    pub fn content_type(&self) -> String {
        format!(
            "audio/wav; codecs=audio/pcm; samplerate={}",
            self.sample_rate
        )
    }
}

impl fmt::Display for PcmStreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codec = match self.codec {
            SampleCodec::PcmS16Le => "pcm_s16le".to_string(),
            SampleCodec::Other {
                bits_per_sample,
                float,
            } => format!("{}{}", if float { "f" } else { "s" }, bits_per_sample),
        };
        write!(
            f,
            "{} {}ch {}Hz wav",
            codec, self.channels, self.sample_rate
        )
    }
}
