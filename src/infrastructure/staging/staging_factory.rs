use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{StagingStrategy, Transcoder};

use super::adaptive_staging::AdaptiveStaging;
use super::disk_staging::DiskStaging;
use super::in_memory_staging::InMemoryStaging;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StagingMode {
    Auto,
    InMemory,
    Disk,
}

pub struct StagingFactory;

impl StagingFactory {
    pub fn create(
        mode: StagingMode,
        transcoder: Arc<dyn Transcoder>,
        dir: Option<PathBuf>,
    ) -> Arc<dyn StagingStrategy> {
        let dir = dir.unwrap_or_else(std::env::temp_dir);
        match mode {
            StagingMode::Auto => Arc::new(AdaptiveStaging::new(transcoder, dir)),
            StagingMode::InMemory => Arc::new(InMemoryStaging::new(transcoder)),
            StagingMode::Disk => Arc::new(DiskStaging::new(transcoder, dir)),
        }
    }
}
