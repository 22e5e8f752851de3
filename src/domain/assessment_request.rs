use super::AudioSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRequest {
    pub reference_text: String,
    pub audio_source: AudioSource,
}

impl AssessmentRequest {
    /// Validates raw inputs before any I/O happens.
    pub fn new(reference_text: &str, audio_url: &str) -> Result<Self, ValidationError> {
        if reference_text.trim().is_empty() {
            return Err(ValidationError::MissingReferenceText);
        }
        if audio_url.trim().is_empty() {
            return Err(ValidationError::MissingAudioUrl);
        }

        let audio_source = AudioSource::parse(audio_url)
            .map_err(|e| ValidationError::InvalidAudioUrl(e.to_string()))?;
        if !audio_source.is_http() {
            return Err(ValidationError::UnsupportedScheme(
                audio_source.url().scheme().to_string(),
            ));
        }

        Ok(Self {
            reference_text: reference_text.to_string(),
            audio_source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("reference text is missing or empty")]
    MissingReferenceText,
    #[error("audio url is missing or empty")]
    MissingAudioUrl,
    #[error("invalid audio url: {0}")]
    InvalidAudioUrl(String),
    #[error("unsupported audio url scheme: {0}")]
    UnsupportedScheme(String),
}
