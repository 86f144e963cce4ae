use serde::{Deserialize, Serialize};
use std::fmt;

pub const STATUS_FAKE: &str = "STATUS: FAKE";
pub const STATUS_REAL: &str = "STATUS: REAL";
pub const REASON_MARKER: &str = "REASON:";

pub const NO_SOURCES_REASON: &str = "No reliable sources found.";
pub const ALL_MODELS_BUSY: &str = "STATUS: UNVERIFIED\nREASON: All AI models are busy.";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerificationStatus {
    Real,
    Fake,
    Unverified,
}

impl VerificationStatus {
    /// FAKE wins when a reply mentions both markers.
    pub fn from_response(raw: &str) -> Self {
        if raw.contains(STATUS_FAKE) {
            VerificationStatus::Fake
        } else if raw.contains(STATUS_REAL) {
            VerificationStatus::Real
        } else {
            VerificationStatus::Unverified
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Real => write!(f, "REAL"),
            VerificationStatus::Fake => write!(f, "FAKE"),
            VerificationStatus::Unverified => write!(f, "UNVERIFIED"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerificationStatus,
    pub reason: String,
}

impl Verdict {
    pub fn no_evidence() -> Self {
        Self {
            status: VerificationStatus::Unverified,
            reason: NO_SOURCES_REASON.to_string(),
        }
    }

    pub fn from_response(raw: &str) -> Self {
        Self {
            status: VerificationStatus::from_response(raw),
            reason: Self::extract_reason(raw),
        }
    }

    /// Text after the last `REASON:` marker, or the whole reply when there is none.
    fn extract_reason(raw: &str) -> String {
        match raw.rsplit_once(REASON_MARKER) {
            Some((_, tail)) => tail.trim().to_string(),
            None => raw.to_string(),
        }
    }
}
