use serde::Serialize;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Raw scores as reported by an assessment engine, before range checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineScores {
    pub pronunciation: f64,
    pub accuracy: f64,
    pub fluency: f64,
    pub completeness: f64,
    pub prosody: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub reference_text: String,
    pub pronunciation_score: f64,
    pub accuracy_score: f64,
    pub fluency_score: f64,
    pub completeness_score: f64,
    pub prosody_score: f64,
}

impl AssessmentResult {
    /// Fails with the name of the first score outside `[0, 100]`.
    pub fn new(reference_text: String, scores: EngineScores) -> Result<Self, String> {
        let named = [
            ("pronunciation", scores.pronunciation),
            ("accuracy", scores.accuracy),
            ("fluency", scores.fluency),
            ("completeness", scores.completeness),
            ("prosody", scores.prosody),
        ];
        for (name, value) in named {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(format!("{} score out of range: {}", name, value));
            }
        }

        Ok(Self {
            reference_text,
            pronunciation_score: scores.pronunciation,
            accuracy_score: scores.accuracy,
            fluency_score: scores.fluency,
            completeness_score: scores.completeness,
            prosody_score: scores.prosody,
        })
    }
}
