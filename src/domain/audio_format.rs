use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Flac,
    Aac,
    Webm,
    Mp4,
    Unknown,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "wav" | "wave" => Self::Wav,
            "mp3" => Self::Mp3,
            "ogg" | "oga" | "opus" => Self::Ogg,
            "flac" => Self::Flac,
            "aac" | "adts" => Self::Aac,
            "webm" | "weba" => Self::Webm,
            "m4a" | "mp4" | "mov" | "3gp" | "caf" => Self::Mp4,
            _ => Self::Unknown,
        }
    }

    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "audio/wav" | "audio/wave" | "audio/x-wav" | "audio/vnd.wave" => Self::Wav,
            "audio/mpeg" | "audio/mp3" => Self::Mp3,
            "audio/ogg" | "audio/opus" | "application/ogg" => Self::Ogg,
            "audio/flac" | "audio/x-flac" => Self::Flac,
            "audio/aac" | "audio/aacp" => Self::Aac,
            "audio/webm" | "video/webm" => Self::Webm,
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" | "video/mp4" | "video/quicktime"
            | "audio/3gpp" => Self::Mp4,
            _ => Self::Unknown,
        }
    }

    /// Keeps a known guess unless the other side knows better.
    pub fn refine(self, other: AudioFormat) -> Self {
        match (self, other) {
            (_, Self::Unknown) => self,
            (Self::Unknown, known) => known,
            // A container announced by the server wins over a plain-looking extension.
            (_, Self::Mp4) => Self::Mp4,
            (current, _) => current,
        }
    }

    /// Formats whose demuxer may need random access to the input.
    pub fn requires_seeking(&self) -> bool {
        matches!(self, Self::Mp4 | Self::Unknown)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::Aac => "aac",
            Self::Webm => "webm",
            Self::Mp4 => "m4a",
            Self::Unknown => "bin",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
