use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

use crate::application::ports::{AssessmentEngine, AssessmentEngineError};
use crate::application::streaming::PcmAudioStream;
use crate::domain::EngineScores;

const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";
const RECOGNIZED: &str = "Success";

/// Azure Speech short-audio recognition with pronunciation assessment.
/// The audio stream is sent as a chunked request body.
pub struct AzurePronunciationEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl AzurePronunciationEngine {
    pub fn new(api_key: &str, region: &str, language: &str, base_url: Option<&str>) -> Self {
        let base = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{}.stt.speech.microsoft.com", region));
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", base, RECOGNITION_PATH),
            api_key: api_key.to_string(),
            language: language.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Value of the `Pronunciation-Assessment` header: base64 of the JSON config.
pub fn assessment_header(reference_text: &str) -> String {
    let config = serde_json::json!({
        "ReferenceText": reference_text,
        "GradingSystem": "HundredMark",
        "Granularity": "Phoneme",
        "Dimension": "Comprehensive",
        "EnableMiscue": true,
        "EnableProsodyAssessment": true,
    });
    STANDARD.encode(config.to_string())
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AzureRecognitionResponse {
    recognition_status: String,
    #[serde(rename = "NBest", default)]
    n_best: Vec<AzureCandidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AzureCandidate {
    #[serde(default)]
    pronunciation_assessment: Option<AzureScores>,
    #[serde(flatten)]
    inline: AzureScores,
}

#[derive(Deserialize, Default, Clone, Copy)]
#[serde(rename_all = "PascalCase")]
struct AzureScores {
    accuracy_score: Option<f64>,
    fluency_score: Option<f64>,
    completeness_score: Option<f64>,
    pron_score: Option<f64>,
    prosody_score: Option<f64>,
}

impl AzureCandidate {
    /// Newer responses nest scores under `PronunciationAssessment`, older
    /// ones put them on the candidate itself.
    fn scores(&self) -> Result<EngineScores, AssessmentEngineError> {
        let nested = self.pronunciation_assessment.unwrap_or_default();
        let inline = self.inline;
        let pick = |name: &str, a: Option<f64>, b: Option<f64>| {
            a.or(b).ok_or_else(|| {
                AssessmentEngineError::InvalidResponse(format!("missing {} score", name))
            })
        };

        Ok(EngineScores {
            pronunciation: pick("pronunciation", nested.pron_score, inline.pron_score)?,
            accuracy: pick("accuracy", nested.accuracy_score, inline.accuracy_score)?,
            fluency: pick("fluency", nested.fluency_score, inline.fluency_score)?,
            completeness: pick(
                "completeness",
                nested.completeness_score,
                inline.completeness_score,
            )?,
            prosody: pick("prosody", nested.prosody_score, inline.prosody_score)?,
        })
    }
}

#[async_trait]
impl AssessmentEngine for AzurePronunciationEngine {
    async fn assess(
        &self,
        reference_text: &str,
        audio: PcmAudioStream,
    ) -> Result<EngineScores, AssessmentEngineError> {
        let content_type = audio.descriptor().content_type();

        tracing::debug!(
            endpoint = %self.endpoint,
            language = %self.language,
            "Sending audio to Azure pronunciation assessment"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("language", self.language.as_str()), ("format", "detailed")])
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Pronunciation-Assessment", assessment_header(reference_text))
            .header(CONTENT_TYPE, content_type)
            .header(ACCEPT, "application/json")
            .body(reqwest::Body::wrap_stream(audio))
            .send()
            .await
            .map_err(|e| AssessmentEngineError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AssessmentEngineError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: AzureRecognitionResponse = response.json().await.map_err(|e| {
            AssessmentEngineError::InvalidResponse(format!("parse response: {}", e))
        })?;

        if result.recognition_status != RECOGNIZED {
            tracing::warn!(
                status = %result.recognition_status,
                "Azure did not recognize speech"
            );
            return Err(AssessmentEngineError::NotRecognized(
                result.recognition_status,
            ));
        }

        let best = result.n_best.first().ok_or_else(|| {
            AssessmentEngineError::InvalidResponse("no recognition candidates".to_string())
        })?;
        let scores = best.scores()?;

        tracing::info!(
            pronunciation = scores.pronunciation,
            "Azure pronunciation assessment completed"
        );

        Ok(scores)
    }
}
