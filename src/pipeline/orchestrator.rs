use crate::error::ProviderError;
use crate::models::{EvidenceBundle, LocalPrediction, Verdict, ALL_MODELS_BUSY};
use crate::pipeline::model_selector::ModelSelector;
use crate::pipeline::traits::{GenerativeModel, ModelCatalog};
use tracing::{info, warn};

/// Reconciles the style signal with web evidence through the first model that answers.
pub struct VerificationOrchestrator<C, G>
where
    C: ModelCatalog,
    G: GenerativeModel,
{
    pub selector: ModelSelector<C>,
    pub generator: G,
}

impl<C, G> VerificationOrchestrator<C, G>
where
    C: ModelCatalog,
    G: GenerativeModel,
{
    pub fn new(selector: ModelSelector<C>, generator: G) -> Self {
        Self {
            selector,
            generator,
        }
    }

    pub fn build_prompt(claim: &str, evidence: &str, style: &LocalPrediction) -> String {
        format!(
            r#"You are a professional fact checker.
CLAIM: "{claim}"
INPUT ANALYSIS:
- Internal Style Model: The writing style suggests it is {style}.
- Web Evidence: {evidence}
TASK: Verify the claim using the evidence.
If the style is "Fake" but facts are TRUE, mark it as REAL.
FORMAT: STATUS: REAL/FAKE/UNVERIFIED, REASON: 1 sentence explanation."#
        )
    }

    /// Raw reply of the first candidate that returns 200, or the busy sentinel.
    pub async fn generate_with_fallback(&self, prompt: &str) -> String {
        let candidates = self.selector.candidates().await;
        for model in &candidates {
            info!(model = %model, "calling model");
            match self.generator.generate(model, prompt).await {
                Ok(text) => return text,
                Err(ProviderError::RateLimited) => {
                    warn!(model = %model, "model busy; switching");
                }
                Err(ProviderError::NotFound) => {
                    warn!(model = %model, "model not found; switching");
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "model call failed; switching");
                }
            }
        }
        warn!(tried = candidates.len(), "every candidate model failed");
        ALL_MODELS_BUSY.to_string()
    }

    pub async fn verify(
        &self,
        claim: &str,
        evidence: &EvidenceBundle,
        style: &LocalPrediction,
    ) -> Verdict {
        let prompt = Self::build_prompt(claim, &evidence.digest, style);
        let raw = self.generate_with_fallback(&prompt).await;
        Verdict::from_response(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelPreferences;
    use crate::models::{StyleLabel, VerificationStatus};
    use crate::pipeline::mock::{Scripted, ScriptedGenerator, StaticCatalog};
    use std::sync::Arc;
    use std::time::Duration;

    fn orchestrator(
        models: &[&str],
        generator: Arc<ScriptedGenerator>,
    ) -> VerificationOrchestrator<StaticCatalog, Arc<ScriptedGenerator>> {
        let prefs = ModelPreferences {
            preferred: models.iter().map(|s| s.to_string()).collect(),
            fallback: Vec::new(),
            tier_marker: "flash".to_string(),
        };
        let catalog = StaticCatalog::listing(models.iter().map(|s| s.to_string()).collect());
        VerificationOrchestrator::new(ModelSelector::new(catalog, prefs, Duration::ZERO), generator)
    }

    fn evidence() -> EvidenceBundle {
        EvidenceBundle {
            digest: "Title: T\nSnippet: S".to_string(),
            source_link: None,
        }
    }

    #[test]
    fn prompt_carries_all_inputs() {
        let prompt = VerificationOrchestrator::<StaticCatalog, ScriptedGenerator>::build_prompt(
            "The bridge collapsed",
            "Title: Bridge\nSnippet: It collapsed",
            &LocalPrediction::labelled(StyleLabel::Fake),
        );
        assert!(prompt.contains("CLAIM: \"The bridge collapsed\""));
        assert!(prompt.contains("writing style suggests it is Fake."));
        assert!(prompt.contains("Snippet: It collapsed"));
        assert!(prompt.contains("mark it as REAL"));
        assert!(prompt.contains("STATUS: REAL/FAKE/UNVERIFIED"));
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .script("A", Scripted::Status(429))
                .script("B", Scripted::Reply("STATUS: REAL\nREASON: Two outlets agree.".to_string()))
                .script("C", Scripted::Reply("STATUS: FAKE".to_string())),
        );
        let orch = orchestrator(&["A", "B", "C"], generator.clone());
        let verdict = orch
            .verify("claim", &evidence(), &LocalPrediction::Unavailable)
            .await;
        assert_eq!(verdict.status, VerificationStatus::Real);
        assert_eq!(verdict.reason, "Two outlets agree.");
        assert_eq!(generator.calls(), vec!["A".to_string(), "B".to_string()]);
    }

    #[tokio::test]
    async fn exhausted_list_returns_busy_sentinel() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .script("A", Scripted::Status(404))
                .script("B", Scripted::Status(404)),
        );
        let orch = orchestrator(&["A", "B"], generator.clone());
        assert_eq!(orch.generate_with_fallback("p").await, ALL_MODELS_BUSY);
        assert_eq!(generator.calls().len(), 2);
    }

    #[tokio::test]
    async fn other_failures_also_fall_through() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .script("A", Scripted::Status(500))
                .script("B", Scripted::Broken)
                .script("C", Scripted::Reply("STATUS: FAKE\nREASON: Debunked.".to_string())),
        );
        let orch = orchestrator(&["A", "B", "C"], generator.clone());
        let verdict = orch
            .verify("claim", &evidence(), &LocalPrediction::Unavailable)
            .await;
        assert_eq!(verdict.status, VerificationStatus::Fake);
        assert_eq!(generator.calls().len(), 3);
    }

    #[tokio::test]
    async fn empty_candidate_list_is_busy() {
        let generator = Arc::new(ScriptedGenerator::new());
        let orch = orchestrator(&[], generator.clone());
        let verdict = orch
            .verify("claim", &evidence(), &LocalPrediction::Unavailable)
            .await;
        assert_eq!(verdict.status, VerificationStatus::Unverified);
        assert_eq!(verdict.reason, "All AI models are busy.");
        assert!(generator.calls().is_empty());
    }
}
