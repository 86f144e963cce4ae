use crate::html;
use crate::models::looks_like_url;
use crate::pipeline::traits::TitleResolver;
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 Chrome/120.0 Safari/537.36";
const SITE_SEPARATORS: [&str; 2] = [" - ", " | "];

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title>").expect("static regex"))
}

/// First `<title>` of the page, entity-decoded, with any trailing site name cut off.
pub fn extract_title(page: &str) -> Option<String> {
    let raw = title_re().captures(page)?.get(1)?.as_str();
    let mut title = html::unescape(raw.trim());
    for sep in SITE_SEPARATORS {
        if let Some((head, _)) = title.split_once(sep) {
            title = head.to_string();
        }
    }
    let title = title.trim().to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

pub struct WebTitleResolver {
    client: Client,
}

impl WebTitleResolver {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .timeout(timeout)
                .build()?,
        })
    }

    /// Title for URLs, the input itself for anything else.
    pub async fn resolve_query(&self, input: &str) -> String {
        resolve_query(self, input).await
    }
}

/// Search query for an input: the page title when the input is a resolvable URL,
/// otherwise the input unchanged.
pub async fn resolve_query<R: TitleResolver + ?Sized>(resolver: &R, input: &str) -> String {
    if !looks_like_url(input) {
        return input.to_string();
    }
    match resolver.resolve_title(input).await {
        Some(title) => title,
        None => input.to_string(),
    }
}

#[async_trait]
impl TitleResolver for WebTitleResolver {
    async fn resolve_title(&self, url: &str) -> Option<String> {
        info!(url, "visiting URL");
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(url, error = %e, "page fetch failed");
                return None;
            }
        };
        if response.status() != StatusCode::OK {
            debug!(url, status = %response.status(), "page fetch returned non-200");
            return None;
        }
        let body = response.text().await.ok()?;
        extract_title(&body)
    }
}
