use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// Structured assessment of a resume against one job description.
/// This is the exact shape the UI renders; the evaluator rejects model
/// output that does not fit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// 0 – 100
    #[serde(deserialize_with = "deserialize_score")]
    pub match_score: u8,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub qualifications_match: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub email_draft: String,
}

impl EvaluationResult {
    /// Checks the fields serde cannot: non-empty email draft.
    pub fn validate(&self) -> Result<(), String> {
        if self.email_draft.trim().is_empty() {
            return Err("email_draft is empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub analysis: EvaluationResult,
}

/// Accepts `85`, `"85"` and `"85%"`; rejects anything above 100.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScore {
        Int(u64),
        Float(f64),
        Text(String),
    }

    let value = match RawScore::deserialize(deserializer)? {
        RawScore::Int(n) => n as f64,
        RawScore::Float(f) => f,
        RawScore::Text(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("match_score '{s}' is not a number")))?,
    };

    if !(0.0..=100.0).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "match_score {value} is outside 0-100"
        )));
    }
    Ok(value.round() as u8)
}
