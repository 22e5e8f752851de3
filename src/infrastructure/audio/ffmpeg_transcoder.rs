use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};

use crate::application::ports::{
    AudioByteStream, FetchError, MaterializeError, TranscodeError, Transcoder,
};
use crate::domain::{AudioFormat, PcmStreamDescriptor};

const STDIN_PIPE: &str = "pipe:0";
const STDOUT_PIPE: &str = "pipe:1";

/// Runs `ffmpeg` as a child process, one per conversion.
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, input: &OsStr, output: &OsStr) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(conversion_args(input, output))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    fn spawn_error(&self, e: io::Error) -> TranscodeError {
        if e.kind() == io::ErrorKind::NotFound {
            TranscodeError::ToolUnavailable(format!("{}: {}", self.binary.display(), e))
        } else {
            TranscodeError::Io(format!("spawn {}: {}", self.binary.display(), e))
        }
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

/// Argument list for a conversion to the canonical profile. Passed to the
/// process as separate arguments, never through a shell.
pub fn conversion_args(input: &OsStr, output: &OsStr) -> Vec<OsString> {
    let target = PcmStreamDescriptor::CANONICAL;
    let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(input.to_os_string());
    args.extend(
        [
            "-vn".to_string(),
            "-acodec".to_string(),
            "pcm_s16le".to_string(),
            "-ac".to_string(),
            target.channels.to_string(),
            "-ar".to_string(),
            target.sample_rate.to_string(),
            "-f".to_string(),
            "wav".to_string(),
        ]
        .into_iter()
        .map(OsString::from),
    );
    args.push(output.to_os_string());
    args
}

/// Probes the binary and returns the first line of `ffmpeg -version`.
pub async fn check_ffmpeg_binary(binary: &Path) -> Result<String, TranscodeError> {
    let output = Command::new(binary)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|e| TranscodeError::ToolUnavailable(format!("{}: {}", binary.display(), e)))?;

    if !output.status.success() {
        return Err(process_failure(&output));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string())
}

fn process_failure(output: &Output) -> TranscodeError {
    TranscodeError::ProcessFailed {
        exit_code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
    }
}

/// ffmpeg cannot seek back into a pipe to fill in the RIFF and `data` chunk
/// sizes, so they are patched once the whole output is buffered.
pub fn patch_wav_sizes(wav: &mut [u8]) {
    if wav.len() < 12 || &wav[0..4] != b"RIFF" {
        return;
    }
    let riff_size = (wav.len() - 8) as u32;
    wav[4..8].copy_from_slice(&riff_size.to_le_bytes());

    let mut offset = 12;
    while offset + 8 <= wav.len() {
        if &wav[offset..offset + 4] == b"data" {
            let data_size = (wav.len() - offset - 8) as u32;
            wav[offset + 4..offset + 8].copy_from_slice(&data_size.to_le_bytes());
            return;
        }
        let size = u32::from_le_bytes([
            wav[offset + 4],
            wav[offset + 5],
            wav[offset + 6],
            wav[offset + 7],
        ]) as usize;
        offset += 8 + size + (size & 1);
    }
}

enum PumpError {
    Fetch(FetchError),
    Pipe(io::Error),
}

async fn pump(mut input: AudioByteStream, mut stdin: ChildStdin) -> Result<u64, PumpError> {
    let mut written: u64 = 0;
    while let Some(chunk) = input.next().await {
        let chunk = chunk.map_err(PumpError::Fetch)?;
        stdin.write_all(&chunk).await.map_err(PumpError::Pipe)?;
        written += chunk.len() as u64;
    }
    stdin.shutdown().await.map_err(PumpError::Pipe)?;
    Ok(written)
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn accepts_live_stream(&self, format: AudioFormat) -> bool {
        !format.requires_seeking()
    }

    async fn transcode_stream(
        &self,
        input: AudioByteStream,
        format: AudioFormat,
    ) -> Result<Vec<u8>, MaterializeError> {
        let mut child = self
            .command(OsStr::new(STDIN_PIPE), OsStr::new(STDOUT_PIPE))
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TranscodeError::Io("ffmpeg stdin not captured".to_string()))?;

        tracing::debug!(format = %format, "Piping audio into ffmpeg");

        // Feeding stdin and draining stdout/stderr concurrently keeps a full
        // pipe on either side from stalling the other.
        let (pumped, output) = tokio::join!(pump(input, stdin), child.wait_with_output());

        let output = output.map_err(|e| TranscodeError::Io(format!("wait for ffmpeg: {}", e)))?;

        let written = match pumped {
            Err(PumpError::Fetch(e)) => return Err(MaterializeError::Fetch(e)),
            Err(PumpError::Pipe(e)) if output.status.success() => {
                return Err(TranscodeError::Io(format!("ffmpeg stdin: {}", e)).into());
            }
            Err(PumpError::Pipe(_)) => return Err(process_failure(&output).into()),
            Ok(written) => written,
        };

        if !output.status.success() {
            return Err(process_failure(&output).into());
        }

        tracing::debug!(
            bytes_in = written,
            bytes_out = output.stdout.len(),
            "ffmpeg stream conversion finished"
        );

        let mut wav = output.stdout;
        patch_wav_sizes(&mut wav);
        Ok(wav)
    }

    async fn transcode_file(
        &self,
        input: &Path,
        output: &Path,
        format: AudioFormat,
    ) -> Result<(), TranscodeError> {
        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            format = %format,
            "Running ffmpeg file conversion"
        );

        let result = self
            .command(input.as_os_str(), output.as_os_str())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !result.status.success() {
            return Err(process_failure(&result));
        }

        Ok(())
    }
}
