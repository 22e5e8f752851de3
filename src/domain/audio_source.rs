use std::fmt;

use url::Url;

use super::AudioFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource(Url);

impl AudioSource {
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw.trim()).map(Self)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn is_http(&self) -> bool {
        matches!(self.0.scheme(), "http" | "https")
    }

    /// Best-effort guess from the last path segment's extension.
    pub fn format_hint(&self) -> AudioFormat {
        self.0
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| AudioFormat::from_extension(ext))
            .unwrap_or(AudioFormat::Unknown)
    }
}

/// Origin and path only. Query strings and credentials often carry signed
/// access tokens and never reach logs or error messages.
impl fmt::Display for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.origin().ascii_serialization(), self.0.path())
    }
}
