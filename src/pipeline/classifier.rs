//! Local writing-style classifier.
//!
//! The artifact is a JSON export of a fitted TF-IDF vectorizer and a binary
//! linear model. Label `1` is fake news.

use crate::error::ClassifierError;
use crate::models::{LocalPrediction, StyleLabel};
use crate::pipeline::traits::StyleClassifier;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static regex"))
}

#[derive(Clone, Debug, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_true() -> bool {
    true
}

impl TfidfVectorizer {
    /// L2-normalised sparse feature vector as `(index, weight)` pairs.
    pub fn transform(&self, text: &str) -> Result<Vec<(usize, f64)>, ClassifierError> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in token_re().find_iter(&text) {
            if let Some(&idx) = self.vocabulary.get(token.as_str()) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features = Vec::with_capacity(counts.len());
        for (idx, count) in counts {
            let idf = self
                .idf
                .get(idx)
                .copied()
                .ok_or(ClassifierError::DimensionMismatch {
                    features: idx + 1,
                    weights: self.idf.len(),
                })?;
            let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
            features.push((idx, tf * idf));
        }

        let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in features.iter_mut() {
                *w /= norm;
            }
        }
        Ok(features)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinearKind {
    /// Exposes class probabilities through the logistic function.
    Logistic,
    /// Decision function only.
    Linear,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LinearModel {
    pub kind: LinearKind,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    fn decision(&self, features: &[(usize, f64)]) -> f64 {
        features
            .iter()
            .map(|&(idx, w)| self.coef.get(idx).copied().unwrap_or(0.0) * w)
            .sum::<f64>()
            + self.intercept
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct StyleModelArtifact {
    pub vectorizer: TfidfVectorizer,
    pub classifier: LinearModel,
}

pub struct LinearStyleClassifier {
    artifact: StyleModelArtifact,
}

impl LinearStyleClassifier {
    pub fn new(artifact: StyleModelArtifact) -> Self {
        Self { artifact }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let raw = fs::read_to_string(path)?;
        let artifact: StyleModelArtifact = serde_json::from_str(&raw)?;
        Ok(Self::new(artifact))
    }

    pub fn try_predict(&self, text: &str) -> Result<LocalPrediction, ClassifierError> {
        let vectorizer = &self.artifact.vectorizer;
        let model = &self.artifact.classifier;
        if vectorizer.idf.len() != model.coef.len() {
            return Err(ClassifierError::DimensionMismatch {
                features: vectorizer.idf.len(),
                weights: model.coef.len(),
            });
        }

        let features = vectorizer.transform(text)?;
        let score = model.decision(&features);
        let prediction = match model.kind {
            LinearKind::Logistic => {
                let fake = 1.0 / (1.0 + (-score).exp());
                let fake_conf = fake * 100.0;
                if fake_conf > 50.0 {
                    LocalPrediction::with_confidence(StyleLabel::Fake, fake_conf)
                } else {
                    LocalPrediction::with_confidence(StyleLabel::Real, 100.0 - fake_conf)
                }
            }
            LinearKind::Linear => {
                if score > 0.0 {
                    LocalPrediction::labelled(StyleLabel::Fake)
                } else {
                    LocalPrediction::labelled(StyleLabel::Real)
                }
            }
        };
        Ok(prediction)
    }
}

/// Degrades to `N/A` when the artifact could not be loaded at startup.
pub enum LocalStyleClassifier {
    Loaded(LinearStyleClassifier),
    Unavailable,
}

impl LocalStyleClassifier {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match LinearStyleClassifier::from_path(path) {
            Ok(c) => {
                info!(path = %path.display(), "local style model loaded");
                LocalStyleClassifier::Loaded(c)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "local style model not found; running cloud-only");
                LocalStyleClassifier::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, LocalStyleClassifier::Loaded(_))
    }
}

impl StyleClassifier for LocalStyleClassifier {
    fn predict(&self, text: &str) -> LocalPrediction {
        match self {
            LocalStyleClassifier::Loaded(c) => c
                .try_predict(text)
                .unwrap_or_else(|e| LocalPrediction::Error(e.to_string())),
            LocalStyleClassifier::Unavailable => LocalPrediction::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ARTIFACT: &str = r#"{
        "vectorizer": {
            "vocabulary": {"shocking": 0, "secret": 1, "reported": 2, "officials": 3},
            "idf": [1.5, 1.5, 1.2, 1.2]
        },
        "classifier": {
            "kind": "logistic",
            "coef": [3.0, 2.5, -2.0, -2.5],
            "intercept": 0.0
        }
    }"#;

    fn logistic() -> LinearStyleClassifier {
        LinearStyleClassifier::new(serde_json::from_str(ARTIFACT).unwrap())
    }

    #[test]
    fn transform_is_l2_normalised() {
        let c = logistic();
        let features = c.artifact.vectorizer.transform("SHOCKING secret, shocking!").unwrap();
        let norm: f64 = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn logistic_reports_confidence() {
        let c = logistic();
        match c.try_predict("Shocking secret they hide").unwrap() {
            LocalPrediction::Label {
                label: StyleLabel::Fake,
                confidence: Some(conf),
            } => assert!(conf > 50.0 && conf <= 100.0),
            other => panic!("unexpected prediction {:?}", other),
        }
        match c.try_predict("Officials reported the figures").unwrap() {
            LocalPrediction::Label {
                label: StyleLabel::Real,
                confidence: Some(conf),
            } => assert!(conf >= 50.0),
            other => panic!("unexpected prediction {:?}", other),
        }
    }

    #[test]
    fn unknown_words_sit_on_the_boundary() {
        let prediction = logistic().try_predict("zzz qqq").unwrap();
        assert_eq!(prediction.to_string(), "Real (50.0% confidence)");
    }

    #[test]
    fn linear_model_has_no_confidence() {
        let mut artifact: StyleModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        artifact.classifier.kind = LinearKind::Linear;
        let c = LinearStyleClassifier::new(artifact);
        assert_eq!(c.try_predict("shocking secret").unwrap().to_string(), "Fake");
        assert_eq!(c.try_predict("officials reported").unwrap().to_string(), "Real");
    }

    #[test]
    fn mismatched_artifact_yields_error_label() {
        let mut artifact: StyleModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        artifact.classifier.coef.pop();
        let c = LocalStyleClassifier::Loaded(LinearStyleClassifier::new(artifact));
        assert!(c.predict("shocking").to_string().starts_with("Error: "));
    }

    #[test]
    fn missing_artifact_degrades_to_na() {
        let c = LocalStyleClassifier::load("/definitely/not/here.json");
        assert!(!c.is_available());
        assert_eq!(c.predict("anything").to_string(), "N/A");
    }

    #[test]
    fn loads_artifact_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ARTIFACT.as_bytes()).unwrap();
        let c = LocalStyleClassifier::load(file.path());
        assert!(c.is_available());
    }
}
