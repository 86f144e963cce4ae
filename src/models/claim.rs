use serde::{Deserialize, Serialize};

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

pub fn looks_like_url(input: &str) -> bool {
    let head: String = input.trim_start().chars().take(8).collect::<String>().to_ascii_lowercase();
    URL_SCHEMES.iter().any(|scheme| head.starts_with(scheme))
}

/// User input to be fact-checked, either free text or a link to an article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Claim {
    Text(String),
    Url(String),
}

impl Claim {
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if looks_like_url(trimmed) {
            Some(Claim::Url(trimmed.to_string()))
        } else {
            Some(Claim::Text(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Claim::Text(s) | Claim::Url(s) => s,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Claim::Url(_))
    }
}
