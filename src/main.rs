use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use tokio::net::TcpListener;

use eloquence::infrastructure::audio::check_ffmpeg_binary;
use eloquence::infrastructure::observability::{TracingConfig, init_tracing};
use eloquence::presentation::config::TranscoderProviderSetting;
use eloquence::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    let mut tracing_config = TracingConfig::default().with_default_filter(&settings.logging.level);
    tracing_config.json_format |= settings.logging.enable_json;
    init_tracing(&tracing_config);

    if let TranscoderProviderSetting::Ffmpeg = settings.transcoder.provider {
        match check_ffmpeg_binary(Path::new(&settings.transcoder.ffmpeg_path)).await {
            Ok(version) => tracing::info!(version = %version, "ffmpeg available"),
            Err(e) => tracing::warn!(error = %e, "ffmpeg check failed; conversions will fail"),
        }
    }

    let scaffold = ScaffoldConfig::from_env();
    let state = AppState::from_settings(&settings, &scaffold)
        .context("failed to build assessment pipeline")?;
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(
        %addr,
        environment = %environment,
        scaffold = scaffold.enabled,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
