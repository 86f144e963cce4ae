use crate::error::ProviderError;
use crate::models::{CheckOutcome, Claim, LocalPrediction, SearchHit};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait TitleResolver: Send + Sync {
    /// `None` on any failure; the caller searches with the raw URL instead.
    async fn resolve_title(&self, url: &str) -> Option<String>;
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchHit>, ProviderError>;
}

pub trait StyleClassifier: Send + Sync {
    fn predict(&self, text: &str) -> LocalPrediction;
}

#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// Model identifiers without the provider's `models/` prefix, in listing order.
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait ClaimChecker: Send + Sync {
    async fn check(&self, claim: &Claim) -> CheckOutcome;
}

#[async_trait]
impl<T: TitleResolver + ?Sized> TitleResolver for Arc<T> {
    async fn resolve_title(&self, url: &str) -> Option<String> {
        (**self).resolve_title(url).await
    }
}

#[async_trait]
impl<T: SearchProvider + ?Sized> SearchProvider for Arc<T> {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        (**self).search(query, max_results).await
    }
}

impl<T: StyleClassifier + ?Sized> StyleClassifier for Arc<T> {
    fn predict(&self, text: &str) -> LocalPrediction {
        (**self).predict(text)
    }
}

#[async_trait]
impl<T: ModelCatalog + ?Sized> ModelCatalog for Arc<T> {
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        (**self).list_models().await
    }
}

#[async_trait]
impl<T: GenerativeModel + ?Sized> GenerativeModel for Arc<T> {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        (**self).generate(model, prompt).await
    }
}
