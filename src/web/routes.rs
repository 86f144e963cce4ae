use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::pages::{self, PageView};
use crate::models::Claim;
use crate::pipeline::ClaimChecker;

pub const INPUT_NEEDED: &str = "Input needed";

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<dyn ClaimChecker>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub news_text: Option<String>,
    #[serde(default)]
    pub news_url: Option<String>,
}

impl PredictForm {
    /// First non-blank field wins, text before URL.
    pub fn claim(&self) -> Option<Claim> {
        [self.news_text.as_deref(), self.news_url.as_deref()]
            .into_iter()
            .flatten()
            .find_map(Claim::parse)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(pages::index_page(&PageView::default()))
}

async fn predict(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Html<String> {
    let Some(claim) = form.claim() else {
        return Html(pages::index_page(&PageView {
            prediction_text: Some(INPUT_NEEDED.to_string()),
            ..PageView::default()
        }));
    };

    let outcome = state.checker.check(&claim).await;
    info!(check = %outcome.check_id, status = %outcome.verdict.status, "check complete");

    Html(pages::index_page(&PageView {
        prediction_text: Some(outcome.prediction_text()),
        original_text: Some(outcome.original_text),
        source_link: outcome.source_link,
    }))
}
