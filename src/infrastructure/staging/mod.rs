mod adaptive_staging;
mod disk_staging;
mod in_memory_staging;
mod staging_factory;
mod temp_artifact;

pub use adaptive_staging::AdaptiveStaging;
pub use disk_staging::DiskStaging;
pub use in_memory_staging::InMemoryStaging;
pub use staging_factory::{StagingFactory, StagingMode};
pub use temp_artifact::TempArtifact;
