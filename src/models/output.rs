use crate::models::ids::CheckId;
use crate::models::prediction::LocalPrediction;
use crate::models::verify::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the request handler needs to render one fact-check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub check_id: CheckId,
    pub original_text: String,
    pub query: String,
    pub style: LocalPrediction,
    pub verdict: Verdict,
    pub source_link: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl CheckOutcome {
    /// `"<LABEL>: <reason> (Style Analysis: <local_result>)"`
    pub fn prediction_text(&self) -> String {
        format!(
            "{}: {} (Style Analysis: {})",
            self.verdict.status, self.verdict.reason, self.style
        )
    }
}
