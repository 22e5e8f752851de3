use eloquence::domain::{AssessmentRequest, AudioFormat, ValidationError};

#[test]
fn given_text_and_https_url_when_creating_request_then_keeps_text() {
    let request =
        AssessmentRequest::new("Bonjour à tous", "https://cdn.example.com/a/clip.m4a").unwrap();

    assert_eq!(request.reference_text, "Bonjour à tous");
    assert_eq!(request.audio_source.format_hint(), AudioFormat::Mp4);
    assert!(request.audio_source.is_http());
}

#[test]
fn given_blank_reference_text_when_creating_request_then_rejects() {
    let result = AssessmentRequest::new(" \t ", "https://cdn.example.com/clip.wav");

    assert_eq!(result.unwrap_err(), ValidationError::MissingReferenceText);
}

#[test]
fn given_empty_audio_url_when_creating_request_then_rejects() {
    let result = AssessmentRequest::new("Bonjour", "");

    assert_eq!(result.unwrap_err(), ValidationError::MissingAudioUrl);
}

#[test]
fn given_malformed_audio_url_when_creating_request_then_rejects() {
    let result = AssessmentRequest::new("Bonjour", "not a url");

    assert!(matches!(result, Err(ValidationError::InvalidAudioUrl(_))));
}

#[test]
fn given_non_http_scheme_when_creating_request_then_rejects() {
    let result = AssessmentRequest::new("Bonjour", "ftp://cdn.example.com/clip.wav");

    assert_eq!(
        result.unwrap_err(),
        ValidationError::UnsupportedScheme("ftp".to_string())
    );
}

#[test]
fn given_url_without_extension_when_reading_format_hint_then_unknown() {
    let request = AssessmentRequest::new("Bonjour", "https://cdn.example.com/audio/123").unwrap();

    assert_eq!(request.audio_source.format_hint(), AudioFormat::Unknown);
}
