use crate::error::ProviderError;
use crate::html;
use crate::models::SearchHit;
use crate::pipeline::traits::SearchProvider;
use crate::pipeline::url_resolver::BROWSER_USER_AGENT;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DUCKDUCKGO_HTML_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

fn result_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\s([^>]*class="[^"]*\bresult__a\b[^"]*"[^>]*)>(.*?)</a>"#)
            .expect("static regex")
    })
}

fn snippet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?is)<(a|div|td)\s[^>]*class="[^"]*\bresult__snippet\b[^"]*"[^>]*>(.*?)</(?:a|div|td)>"#,
        )
        .expect("static regex")
    })
}

fn href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)\bhref="([^"]*)""#).expect("static regex"))
}

/// Resolves DuckDuckGo's `/l/?uddg=` redirect wrapper to the target URL.
pub fn decode_result_link(raw: &str) -> Option<String> {
    let raw = html::unescape(raw.trim());
    if raw.is_empty() {
        return None;
    }
    let absolute = if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.clone()
    };
    let parsed = match Url::parse(&absolute) {
        Ok(u) => u,
        Err(_) => return Some(raw),
    };
    let is_ddg = parsed
        .host_str()
        .map(|h| h.ends_with("duckduckgo.com"))
        .unwrap_or(false);
    if is_ddg && parsed.path().starts_with("/l/") {
        if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
            return Some(target.into_owned());
        }
    }
    Some(absolute)
}

fn is_ad_link(href: &str) -> bool {
    href.contains("duckduckgo.com/y.js") || href.contains("ad_provider=")
}

/// Parses the DuckDuckGo HTML results page, keeping page order.
pub fn parse_results(page: &str, max_results: usize) -> Vec<SearchHit> {
    let links: Vec<_> = result_link_re().captures_iter(page).collect();
    let snippets: Vec<_> = snippet_re().captures_iter(page).collect();
    let mut hits = Vec::new();

    for (i, cap) in links.iter().enumerate() {
        if hits.len() >= max_results {
            break;
        }
        let whole = match cap.get(0) {
            Some(m) => m,
            None => continue,
        };
        let window_end = links
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(page.len());

        let attrs = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
        let raw_href = href_re()
            .captures(attrs)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or_default();
        if is_ad_link(raw_href) {
            continue;
        }

        let title = html::text_content(cap.get(2).map(|m| m.as_str()).unwrap_or_default());
        if title.is_empty() {
            continue;
        }
        let body = snippets
            .iter()
            .filter_map(|s| s.get(0).zip(s.get(2)))
            .find(|(m, _)| m.start() >= whole.end() && m.start() < window_end)
            .map(|(_, inner)| html::text_content(inner.as_str()))
            .unwrap_or_default();

        hits.push(SearchHit {
            title,
            body,
            href: decode_result_link(raw_href),
        });
    }
    hits
}

pub struct DuckDuckGoSearch {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Self::with_endpoint(DUCKDUCKGO_HTML_ENDPOINT, timeout)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .timeout(timeout)
                .build()?,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let hits = parse_results(&body, max_results);
        debug!(count = hits.len(), "search results parsed");
        Ok(hits)
    }
}
