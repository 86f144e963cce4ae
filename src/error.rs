use thiserror::Error;

/// Failure of a single call to a remote provider. Callers decide whether to fall back.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("rate limited")]
    RateLimited,

    #[error("model not found")]
    NotFound,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Carries no request URL; Gemini requests have the key in the query string.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.without_url())
    }
}

impl ProviderError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => ProviderError::RateLimited,
            404 => ProviderError::NotFound,
            _ => ProviderError::Status { status, body },
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode model artifact: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("vectorizer produces {features} features but classifier expects {weights}")]
    DimensionMismatch { features: usize, weights: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn transport_errors_drop_the_request_url() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/models")
            .query(&[("key", "SECRETKEY123")])
            .send()
            .await
            .unwrap_err();
        let err = ProviderError::from(err);
        assert!(matches!(err, ProviderError::Transport(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
        assert!(!format!("{:?}", err).contains("SECRETKEY123"));
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(ProviderError::from_status(429, String::new()), ProviderError::RateLimited));
        assert!(matches!(ProviderError::from_status(404, String::new()), ProviderError::NotFound));
        assert!(matches!(
            ProviderError::from_status(500, "boom".into()),
            ProviderError::Status { status: 500, .. }
        ));
    }
}
