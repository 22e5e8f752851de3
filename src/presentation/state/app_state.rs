use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::AssessmentEngineError;
use crate::application::services::{AssessmentOrchestrator, OrchestratorSettings};
use crate::infrastructure::assessment::{AssessmentEngineFactory, AssessmentProvider};
use crate::infrastructure::audio::TranscoderFactory;
use crate::infrastructure::fetch::HttpAudioFetcher;
use crate::infrastructure::staging::StagingFactory;
use crate::presentation::config::{ScaffoldConfig, Settings};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AssessmentOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<AssessmentOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Wires the production collaborators described by `settings`.
    pub fn from_settings(
        settings: &Settings,
        scaffold: &ScaffoldConfig,
    ) -> Result<Self, AssessmentEngineError> {
        let fetcher = Arc::new(HttpAudioFetcher::new(
            reqwest::Client::new(),
            settings.fetch.max_bytes(),
        ));

        let transcoder = TranscoderFactory::create(
            settings.transcoder.provider.into(),
            &settings.transcoder.ffmpeg_path,
        );
        let staging = StagingFactory::create(
            settings.staging.mode.into(),
            transcoder,
            settings.staging.temp_dir.as_ref().map(PathBuf::from),
        );

        let provider = if scaffold.enabled {
            AssessmentProvider::Mock
        } else {
            settings.speech.provider.into()
        };
        let engine = AssessmentEngineFactory::create(
            provider,
            &settings.speech.api_key,
            &settings.speech.region,
            &settings.speech.language,
            settings.speech.endpoint.as_deref(),
        )?;

        let orchestrator = AssessmentOrchestrator::new(
            fetcher,
            staging,
            engine,
            OrchestratorSettings::from(&settings.streaming),
        );

        Ok(Self::new(Arc::new(orchestrator)))
    }
}
