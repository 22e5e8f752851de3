mod health;
mod speech_assessment;

pub use health::health_handler;
pub use speech_assessment::speech_assessment_handler;
