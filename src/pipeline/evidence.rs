use crate::models::EvidenceBundle;
use crate::pipeline::traits::SearchProvider;
use tracing::{info, warn};

pub struct EvidenceRetriever<S>
where
    S: SearchProvider,
{
    pub search: S,
    pub max_results: usize,
}

impl<S> EvidenceRetriever<S>
where
    S: SearchProvider,
{
    pub fn new(search: S, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }

    /// `None` means no evidence: either zero hits or a failed search.
    pub async fn retrieve(&self, query: &str) -> Option<EvidenceBundle> {
        let preview: String = query.chars().take(50).collect();
        info!(query = %preview, "searching");
        let hits = match self.search.search(query, self.max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "search failed");
                return None;
            }
        };
        let bundle = EvidenceBundle::from_hits(&hits);
        if bundle.is_none() {
            info!("search returned no results");
        }
        bundle
    }
}
