use anyhow::Context;
use dotenv::dotenv;
use news_verifier::config::AppConfig;
use news_verifier::pipeline::{
    DuckDuckGoSearch, EvidenceRetriever, FactCheckPipeline, GeminiClient, LocalStyleClassifier,
    ModelSelector, VerificationOrchestrator, WebTitleResolver,
};
use news_verifier::web::{create_router, AppState};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("news_verifier=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();

    let classifier = LocalStyleClassifier::load(&config.style_model_path);
    let gemini = Arc::new(GeminiClient::from_config(&config).context("building Gemini client")?);

    let pipeline = FactCheckPipeline {
        resolver: WebTitleResolver::new(config.url_fetch_timeout)
            .context("building URL resolver")?,
        retriever: EvidenceRetriever::new(
            DuckDuckGoSearch::new(SEARCH_TIMEOUT).context("building search client")?,
            config.search_max_results,
        ),
        classifier,
        orchestrator: VerificationOrchestrator::new(
            ModelSelector::new(gemini.clone(), config.models.clone(), config.model_list_ttl),
            gemini,
        ),
    };

    let app = create_router(AppState {
        checker: Arc::new(pipeline),
    });

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "news verifier listening");
    axum::serve(listener, app).await?;
    Ok(())
}
