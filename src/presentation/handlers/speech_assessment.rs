use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::AssessmentError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SpeechAssessmentRequest {
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub reference_text: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub stage: String,
}

#[tracing::instrument(skip_all)]
pub async fn speech_assessment_handler(
    State(state): State<AppState>,
    Json(request): Json<SpeechAssessmentRequest>,
) -> impl IntoResponse {
    match state
        .orchestrator
        .run_assessment(&request.reference_text, &request.audio_url)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => (
            status_for(&e),
            Json(ErrorResponse {
                error: e.to_string(),
                stage: e.failed_stage().to_string(),
            }),
        )
            .into_response(),
    }
}

fn status_for(error: &AssessmentError) -> StatusCode {
    match error {
        AssessmentError::Validation(_) => StatusCode::BAD_REQUEST,
        AssessmentError::Fetch(_) | AssessmentError::Engine(_) => StatusCode::BAD_GATEWAY,
        AssessmentError::Transcode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentError::StreamAdapter(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
