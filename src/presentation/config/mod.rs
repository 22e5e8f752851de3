mod environment;
mod scaffold_config;
mod settings;

pub use environment::Environment;
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    AssessmentProviderSetting, FetchSettings, LoggingSettings, ServerSettings, Settings,
    SpeechSettings, StagingModeSetting, StagingSettings, StreamingSettings, TranscoderProviderSetting,
    TranscoderSettings,
};
