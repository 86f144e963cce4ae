use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum StyleLabel {
    Real,
    Fake,
}

impl fmt::Display for StyleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleLabel::Real => write!(f, "Real"),
            StyleLabel::Fake => write!(f, "Fake"),
        }
    }
}

/// Writing-style signal from the local classifier. Says nothing about facts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LocalPrediction {
    Label {
        label: StyleLabel,
        /// Percentage in `0.0..=100.0`, present when the classifier exposes probabilities.
        confidence: Option<f64>,
    },
    Unavailable,
    Error(String),
}

impl LocalPrediction {
    pub fn labelled(label: StyleLabel) -> Self {
        LocalPrediction::Label {
            label,
            confidence: None,
        }
    }

    pub fn with_confidence(label: StyleLabel, confidence: f64) -> Self {
        LocalPrediction::Label {
            label,
            confidence: Some(confidence.clamp(0.0, 100.0)),
        }
    }
}

impl fmt::Display for LocalPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalPrediction::Label {
                label,
                confidence: Some(conf),
            } => write!(f, "{} ({:.1}% confidence)", label, conf),
            LocalPrediction::Label {
                label,
                confidence: None,
            } => write!(f, "{}", label),
            LocalPrediction::Unavailable => write!(f, "N/A"),
            LocalPrediction::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}
