use serde::{Deserialize, Serialize};

/// One result row from the search provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub body: String,
    pub href: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub digest: String,
    pub source_link: Option<String>,
}

impl EvidenceBundle {
    /// Hits stay in provider order. Returns `None` when there are no hits.
    pub fn from_hits(hits: &[SearchHit]) -> Option<Self> {
        let first = hits.first()?;
        let digest = hits
            .iter()
            .map(|h| format!("Title: {}\nSnippet: {}", h.title, h.body))
            .collect::<Vec<_>>()
            .join("\n");
        Some(Self {
            digest,
            source_link: first.href.clone(),
        })
    }
}
