use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{
    AudioByteStream, FetchedAudio, MaterializeError, StagingStrategy, TranscodeError, Transcoder,
};
use crate::domain::{PcmAudio, StagingToken};

use super::temp_artifact::TempArtifact;

/// Persists the payload to a temp input file, converts it file-to-file and
/// reads the output back. Both files are removed before `materialize`
/// returns, whatever the outcome.
pub struct DiskStaging {
    transcoder: Arc<dyn Transcoder>,
    dir: PathBuf,
}

impl DiskStaging {
    pub fn new(transcoder: Arc<dyn Transcoder>, dir: PathBuf) -> Self {
        Self { transcoder, dir }
    }

    async fn stage_and_convert(
        &self,
        fetched: FetchedAudio,
        input: &TempArtifact,
        output: &TempArtifact,
    ) -> Result<PcmAudio, MaterializeError> {
        let written = write_payload(fetched.stream, input.path()).await?;

        tracing::debug!(
            bytes = written,
            path = %input.path().display(),
            "Audio payload staged"
        );

        self.transcoder
            .transcode_file(input.path(), output.path(), fetched.format)
            .await?;

        let wav = tokio::fs::read(output.path()).await.map_err(|e| {
            TranscodeError::Io(format!("read {}: {}", output.path().display(), e))
        })?;

        Ok(PcmAudio::from_wav(wav).map_err(TranscodeError::NonConformingOutput)?)
    }
}

async fn write_payload(mut stream: AudioByteStream, path: &Path) -> Result<u64, MaterializeError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| TranscodeError::Io(format!("create {}: {}", path.display(), e)))?;

    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| TranscodeError::Io(format!("write {}: {}", path.display(), e)))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| TranscodeError::Io(format!("flush {}: {}", path.display(), e)))?;

    Ok(written)
}

#[async_trait]
impl StagingStrategy for DiskStaging {
    fn name(&self) -> &'static str {
        "disk"
    }

    async fn materialize(&self, fetched: FetchedAudio) -> Result<PcmAudio, MaterializeError> {
        let token = StagingToken::new();
        let input = TempArtifact::new(token.input_path(&self.dir, fetched.format.extension()));
        let output = TempArtifact::new(token.output_path(&self.dir));

        let result = self.stage_and_convert(fetched, &input, &output).await;

        input.release().await;
        output.release().await;

        result
    }
}
