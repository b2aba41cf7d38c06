use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    api::PromptService,
    catalog::{filter_styles, stats, style_card, CatalogStats, StyleCard},
    lab::{self, LabSnapshot, SharedLab},
    render::{ClipboardWriter, ResultPanel, COPY_CONFIRMATION},
    selection::SelectionPatch,
    submission::SubmitError,
};

#[derive(Clone)]
pub struct AppState {
    pub lab: SharedLab,
    pub service: Arc<dyn PromptService>,
    pub clipboard: Arc<Mutex<Box<dyn ClipboardWriter>>>,
    pub asset_base: Arc<str>,
}

type ApiFailure = (StatusCode, Json<Value>);

fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (status, Json(json!({ "error": message.into() })))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/lab", get(get_lab))
        .route("/api/lab/selection", put(update_selection))
        .route("/api/lab/submit", post(submit_generation))
        .route("/api/lab/reload", post(reload_reference_data))
        .route("/api/lab/prompts/:index/copy", post(copy_prompt))
        .route("/api/styles", get(list_styles))
        .route("/api/stats", get(get_stats))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

pub async fn get_lab(State(state): State<AppState>) -> Json<LabSnapshot> {
    Json(state.lab.read().snapshot())
}

pub async fn update_selection(
    State(state): State<AppState>,
    Json(patch): Json<SelectionPatch>,
) -> Result<Json<LabSnapshot>, ApiFailure> {
    let mut guard = state.lab.write();
    guard.update_selection(patch).map_err(|e| failure(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    Ok(Json(guard.snapshot()))
}

pub async fn submit_generation(State(state): State<AppState>) -> Result<Json<ResultPanel>, ApiFailure> {
    match lab::submit(&state.lab, state.service.as_ref()).await {
        Ok(panel) => Ok(Json(panel)),
        Err(e @ SubmitError::AlreadySubmitting) => Err(failure(StatusCode::CONFLICT, e.to_string())),
        Err(e @ SubmitError::NotReady) => Err(failure(StatusCode::SERVICE_UNAVAILABLE, e.to_string())),
        Err(e @ SubmitError::Invalid(_)) => Err(failure(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())),
    }
}

pub async fn reload_reference_data(State(state): State<AppState>) -> Json<LabSnapshot> {
    tracing::info!("🔄 Reloading reference data");
    lab::load(&state.lab, state.service.as_ref()).await;
    Json(state.lab.read().snapshot())
}

#[derive(Debug, Serialize)]
pub struct CopyReceipt {
    pub index: usize,
    pub text: String,
    pub confirmation: &'static str,
}

pub async fn copy_prompt(Path(index): Path<usize>, State(state): State<AppState>) -> Result<Json<CopyReceipt>, ApiFailure> {
    let text = state
        .lab
        .read()
        .variant_text(index)
        .map(str::to_string)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("no prompt at index {index}")))?;

    state.clipboard.lock().write_text(&text).map_err(|e| {
        tracing::error!("❌ Copy failed: {}", e);
        failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    tracing::info!("📋 Copied prompt {} ({} chars)", index, text.chars().count());
    Ok(Json(CopyReceipt { index, text, confirmation: COPY_CONFIRMATION }))
}

#[derive(Debug, Deserialize, Default)]
pub struct StyleQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list_styles(State(state): State<AppState>, Query(query): Query<StyleQuery>) -> Json<Vec<StyleCard>> {
    let guard = state.lab.read();
    let cards = filter_styles(&guard.data().styles, &query.q).into_iter().map(|s| style_card(s, &state.asset_base)).collect();
    Json(cards)
}

pub async fn get_stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(stats(state.lab.read().data()))
}
