//! Deterministic stand-ins for the network-facing collaborators.

use crate::error::ProviderError;
use crate::models::{LocalPrediction, SearchHit};
use crate::pipeline::traits::{
    GenerativeModel, ModelCatalog, SearchProvider, StyleClassifier, TitleResolver,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct StaticTitleResolver(pub Option<String>);

#[async_trait]
impl TitleResolver for StaticTitleResolver {
    async fn resolve_title(&self, _url: &str) -> Option<String> {
        self.0.clone()
    }
}

pub struct ScriptedSearch {
    hits: Option<Vec<SearchHit>>,
    requests: Mutex<Vec<(String, usize)>>,
}

impl ScriptedSearch {
    pub fn hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits: Some(hits),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            hits: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, usize)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for ScriptedSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((query.to_string(), max_results));
        }
        match &self.hits {
            Some(hits) => Ok(hits.iter().take(max_results).cloned().collect()),
            None => Err(ProviderError::Status {
                status: 503,
                body: "search unavailable".to_string(),
            }),
        }
    }
}

pub struct FixedStyle(pub LocalPrediction);

impl StyleClassifier for FixedStyle {
    fn predict(&self, _text: &str) -> LocalPrediction {
        self.0.clone()
    }
}

pub struct StaticCatalog {
    models: Option<Vec<String>>,
    calls: Mutex<usize>,
}

impl StaticCatalog {
    pub fn listing(models: Vec<String>) -> Self {
        Self {
            models: Some(models),
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            models: None,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or_default()
    }
}

#[async_trait]
impl ModelCatalog for StaticCatalog {
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        self.models.clone().ok_or(ProviderError::MissingCredential)
    }
}

#[derive(Clone, Debug)]
pub enum Scripted {
    Reply(String),
    Status(u16),
    Broken,
}

/// Replies per model name; unscripted models answer 404.
#[derive(Default)]
pub struct ScriptedGenerator {
    script: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, model: &str, outcome: Scripted) -> Self {
        self.script.insert(model.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedGenerator {
    async fn generate(&self, model: &str, _prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(model.to_string());
        }
        match self.script.get(model) {
            Some(Scripted::Reply(text)) => Ok(text.clone()),
            Some(Scripted::Status(code)) => Err(ProviderError::from_status(*code, String::new())),
            Some(Scripted::Broken) => Err(ProviderError::Malformed("connection reset".to_string())),
            None => Err(ProviderError::NotFound),
        }
    }
}
