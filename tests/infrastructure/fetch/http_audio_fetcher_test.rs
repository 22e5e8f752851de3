use futures::StreamExt;

use eloquence::application::ports::{AudioFetcher, FetchError};
use eloquence::domain::{AudioFormat, AudioSource};
use eloquence::infrastructure::fetch::HttpAudioFetcher;

use crate::helpers::{canonical_wav, start_audio_server, unreachable_url};

async fn collect(
    mut stream: eloquence::application::ports::AudioByteStream,
) -> Result<Vec<u8>, FetchError> {
    let mut data = Vec::new();
    while let Some(chunk) = stream.next().await {
        data.extend_from_slice(&chunk?);
    }
    Ok(data)
}

#[tokio::test]
async fn given_served_wav_when_fetching_then_streams_body_with_format() {
    let wav = canonical_wav(2_000);
    let (base_url, shutdown) =
        start_audio_server(vec![("/clip.wav", wav.clone(), "audio/wav")]).await;
    let source = AudioSource::parse(&format!("{}/clip.wav", base_url)).unwrap();

    let fetched = HttpAudioFetcher::default().fetch(&source).await.unwrap();

    assert_eq!(fetched.format, AudioFormat::Wav);
    assert_eq!(fetched.content_length, Some(wav.len() as u64));
    assert_eq!(collect(fetched.stream).await.unwrap(), wav);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_extensionless_url_when_fetching_then_format_comes_from_content_type() {
    let (base_url, shutdown) =
        start_audio_server(vec![("/media/42", vec![0u8; 64], "audio/mp4")]).await;
    let source = AudioSource::parse(&format!("{}/media/42", base_url)).unwrap();

    let fetched = HttpAudioFetcher::default().fetch(&source).await.unwrap();

    assert_eq!(fetched.format, AudioFormat::Mp4);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_missing_resource_when_fetching_then_returns_status_error() {
    let (base_url, shutdown) = start_audio_server(vec![]).await;
    let source = AudioSource::parse(&format!("{}/missing.wav", base_url)).unwrap();

    let result = HttpAudioFetcher::default().fetch(&source).await;

    assert!(matches!(
        result,
        Err(FetchError::Status { status: 404, .. })
    ));

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_host_when_fetching_then_returns_transport_error() {
    let source = AudioSource::parse(&unreachable_url().await).unwrap();

    let result = HttpAudioFetcher::default().fetch(&source).await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn given_signed_url_for_missing_resource_when_fetching_then_error_omits_token() {
    let (base_url, shutdown) = start_audio_server(vec![]).await;
    let source =
        AudioSource::parse(&format!("{}/missing.wav?token=secret", base_url)).unwrap();

    let error = HttpAudioFetcher::default().fetch(&source).await.unwrap_err();

    match &error {
        FetchError::Status { status, url } => {
            assert_eq!(*status, 404);
            assert!(url.ends_with("/missing.wav"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(!error.to_string().contains("secret"));

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_signed_url_on_unreachable_host_when_fetching_then_error_omits_token() {
    let source =
        AudioSource::parse(&format!("{}?token=secret", unreachable_url().await)).unwrap();

    let error = HttpAudioFetcher::default().fetch(&source).await.unwrap_err();

    assert!(matches!(error, FetchError::Transport(_)));
    assert!(!error.to_string().contains("secret"));
}

#[tokio::test]
async fn given_signed_url_when_fetching_then_body_is_streamed() {
    let wav = canonical_wav(400);
    let (base_url, shutdown) =
        start_audio_server(vec![("/clip.wav", wav.clone(), "audio/wav")]).await;
    let source = AudioSource::parse(&format!("{}/clip.wav?token=secret", base_url)).unwrap();

    let fetched = HttpAudioFetcher::default().fetch(&source).await.unwrap();

    assert_eq!(collect(fetched.stream).await.unwrap(), wav);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_body_over_limit_when_fetching_then_returns_too_large() {
    let (base_url, shutdown) =
        start_audio_server(vec![("/big.wav", canonical_wav(4_000), "audio/wav")]).await;
    let source = AudioSource::parse(&format!("{}/big.wav", base_url)).unwrap();
    let fetcher = HttpAudioFetcher::new(reqwest::Client::new(), Some(1_024));

    let result = fetcher.fetch(&source).await;

    assert!(matches!(
        result,
        Err(FetchError::TooLarge { limit_bytes: 1_024 })
    ));

    shutdown.send(()).ok();
}
