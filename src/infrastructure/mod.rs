pub mod assessment;
pub mod audio;
pub mod fetch;
pub mod observability;
pub mod staging;
