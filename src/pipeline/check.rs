use crate::models::{CheckId, CheckOutcome, Claim, Verdict};
use crate::pipeline::evidence::EvidenceRetriever;
use crate::pipeline::orchestrator::VerificationOrchestrator;
use crate::pipeline::traits::{
    ClaimChecker, GenerativeModel, ModelCatalog, SearchProvider, StyleClassifier, TitleResolver,
};
use crate::pipeline::url_resolver::resolve_query;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, info_span, Instrument};

pub struct FactCheckPipeline<R, S, K, C, G>
where
    R: TitleResolver,
    S: SearchProvider,
    K: StyleClassifier,
    C: ModelCatalog,
    G: GenerativeModel,
{
    pub resolver: R,
    pub retriever: EvidenceRetriever<S>,
    pub classifier: K,
    pub orchestrator: VerificationOrchestrator<C, G>,
}

impl<R, S, K, C, G> FactCheckPipeline<R, S, K, C, G>
where
    R: TitleResolver,
    S: SearchProvider,
    K: StyleClassifier,
    C: ModelCatalog,
    G: GenerativeModel,
{
    pub async fn run(&self, claim: &Claim) -> CheckOutcome {
        let check_id = CheckId::new();
        let span = info_span!("check", id = %check_id, url = claim.is_url());
        self.run_inner(check_id, claim).instrument(span).await
    }

    async fn run_inner(&self, check_id: CheckId, claim: &Claim) -> CheckOutcome {
        let input = claim.as_str();
        let query = resolve_query(&self.resolver, input).await;
        let evidence = self.retriever.retrieve(&query).await;

        let style = self.classifier.predict(input);
        info!(style = %style, "local prediction");

        let (verdict, source_link) = match evidence {
            Some(bundle) => {
                let verdict = self.orchestrator.verify(input, &bundle, &style).await;
                (verdict, bundle.source_link)
            }
            None => (Verdict::no_evidence(), None),
        };
        info!(status = %verdict.status, "verdict");

        CheckOutcome {
            check_id,
            original_text: input.to_string(),
            query,
            style,
            verdict,
            source_link,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl<R, S, K, C, G> ClaimChecker for FactCheckPipeline<R, S, K, C, G>
where
    R: TitleResolver,
    S: SearchProvider,
    K: StyleClassifier,
    C: ModelCatalog,
    G: GenerativeModel,
{
    async fn check(&self, claim: &Claim) -> CheckOutcome {
        self.run(claim).await
    }
}
