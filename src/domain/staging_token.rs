use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

/// Per-request token used to name temporary artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagingToken(String);

impl StagingToken {
    pub fn new() -> Self {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self(format!("{}-{}", nanos, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn input_path(&self, dir: &Path, extension: &str) -> PathBuf {
        dir.join(format!("eloquence-{}-in.{}", self.0, extension))
    }

    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("eloquence-{}-out.wav", self.0))
    }
}

impl Default for StagingToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StagingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
