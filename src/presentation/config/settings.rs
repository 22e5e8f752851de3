use config::Environment as EnvironmentSource;
use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::OrchestratorSettings;
use crate::infrastructure::assessment::AssessmentProvider;
use crate::infrastructure::audio::TranscoderProvider;
use crate::infrastructure::staging::StagingMode;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub speech: SpeechSettings,
    pub fetch: FetchSettings,
    pub transcoder: TranscoderSettings,
    pub staging: StagingSettings,
    pub streaming: StreamingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub provider: AssessmentProviderSetting,
    pub api_key: String,
    pub region: String,
    pub language: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentProviderSetting {
    Azure,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    pub max_audio_size_mb: Option<u64>,
}

impl FetchSettings {
    pub fn max_bytes(&self) -> Option<u64> {
        self.max_audio_size_mb.map(|mb| mb * BYTES_PER_MB)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscoderSettings {
    pub provider: TranscoderProviderSetting,
    pub ffmpeg_path: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscoderProviderSetting {
    Ffmpeg,
    Native,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StagingSettings {
    pub mode: StagingModeSetting,
    pub temp_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingModeSetting {
    Auto,
    InMemory,
    Disk,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamingSettings {
    pub chunk_size_bytes: usize,
    pub buffer_chunks: usize,
}

impl From<AssessmentProviderSetting> for AssessmentProvider {
    fn from(setting: AssessmentProviderSetting) -> Self {
        match setting {
            AssessmentProviderSetting::Azure => AssessmentProvider::Azure,
            AssessmentProviderSetting::Mock => AssessmentProvider::Mock,
        }
    }
}

impl From<TranscoderProviderSetting> for TranscoderProvider {
    fn from(setting: TranscoderProviderSetting) -> Self {
        match setting {
            TranscoderProviderSetting::Ffmpeg => TranscoderProvider::Ffmpeg,
            TranscoderProviderSetting::Native => TranscoderProvider::Native,
        }
    }
}

impl From<StagingModeSetting> for StagingMode {
    fn from(setting: StagingModeSetting) -> Self {
        match setting {
            StagingModeSetting::Auto => StagingMode::Auto,
            StagingModeSetting::InMemory => StagingMode::InMemory,
            StagingModeSetting::Disk => StagingMode::Disk,
        }
    }
}

impl From<&StreamingSettings> for OrchestratorSettings {
    fn from(settings: &StreamingSettings) -> Self {
        Self {
            chunk_size_bytes: settings.chunk_size_bytes,
            buffer_chunks: settings.buffer_chunks,
        }
    }
}

impl Settings {
    /// Layers code defaults, `config/base`, `config/<environment>` and
    /// `APP__SECTION__KEY` environment variables, later sources winning.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info,eloquence=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)?
            .set_default("speech.provider", "azure")?
            .set_default("speech.api_key", "")?
            .set_default("speech.region", "westeurope")?
            .set_default("speech.language", "fr-FR")?
            .set_default("fetch.max_audio_size_mb", 25)?
            .set_default("transcoder.provider", "ffmpeg")?
            .set_default("transcoder.ffmpeg_path", "ffmpeg")?
            .set_default("staging.mode", "auto")?
            .set_default("streaming.chunk_size_bytes", 32_000)?
            .set_default("streaming.buffer_chunks", 16)?
            .add_source(File::with_name("config/base").required(false))
            .add_source(File::with_name(&environment.config_file()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
