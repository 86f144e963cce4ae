use crate::config::ModelPreferences;
use crate::pipeline::traits::ModelCatalog;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Preferred models that are available, in preference order, then every other
/// available fast-tier model in listing order.
pub fn prioritize(available: &[String], prefs: &ModelPreferences) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::new();
    for pref in &prefs.preferred {
        if available.contains(pref) && !ordered.contains(pref) {
            ordered.push(pref.clone());
        }
    }
    for name in available {
        if name.contains(prefs.tier_marker.as_str()) && !ordered.contains(name) {
            ordered.push(name.clone());
        }
    }
    ordered
}

struct CachedCandidates {
    fetched_at: Instant,
    models: Vec<String>,
}

pub struct ModelSelector<C>
where
    C: ModelCatalog,
{
    pub catalog: C,
    prefs: ModelPreferences,
    ttl: Duration,
    cache: Mutex<Option<CachedCandidates>>,
}

impl<C> ModelSelector<C>
where
    C: ModelCatalog,
{
    /// A zero `ttl` re-scans the account on every call.
    pub fn new(catalog: C, prefs: ModelPreferences, ttl: Duration) -> Self {
        Self {
            catalog,
            prefs,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub async fn candidates(&self) -> Vec<String> {
        if self.ttl.is_zero() {
            return self.scan().await.unwrap_or_else(|| self.prefs.fallback.clone());
        }

        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return cached.models.clone();
            }
        }
        match self.scan().await {
            Some(models) => {
                *cache = Some(CachedCandidates {
                    fetched_at: Instant::now(),
                    models: models.clone(),
                });
                models
            }
            None => self.prefs.fallback.clone(),
        }
    }

    async fn scan(&self) -> Option<Vec<String>> {
        info!("scanning account for usable models");
        match self.catalog.list_models().await {
            Ok(available) => {
                let models = prioritize(&available, &self.prefs);
                if models.is_empty() {
                    warn!(available = available.len(), "no preferred or fast-tier models available");
                } else {
                    let head: Vec<&str> = models.iter().take(3).map(String::as_str).collect();
                    info!(models = ?head, total = models.len(), "prioritized model list");
                }
                Some(models)
            }
            Err(e) => {
                warn!(error = %e, "model scan failed; using fallback list");
                None
            }
        }
    }
}
