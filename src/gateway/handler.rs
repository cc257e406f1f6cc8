use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::constants::DEFAULT_TOP_WORDS;
use crate::gateway::error::GatewayError;
use crate::gateway::state::GatewayState;
use crate::ranking::SimilarityRecord;
use crate::snapshot::{DailySnapshot, GuessOutcome, TopWord, normalize_guess};

#[derive(Debug, Deserialize)]
pub struct TopWordsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub date: String,
    pub word: String,
    pub similarities: Vec<SimilarityRecord>,
    pub fresh: bool,
}

async fn load_snapshot(state: &GatewayState) -> Result<Arc<DailySnapshot>, GatewayError> {
    let cache = Arc::clone(&state.snapshots);
    tokio::task::spawn_blocking(move || cache.current())
        .await
        .map_err(|e| GatewayError::InternalError(format!("snapshot task panicked: {}", e)))?
        .map_err(|e| GatewayError::InternalError(e.to_string()))?
        .ok_or(GatewayError::SnapshotUnavailable)
}

#[instrument(skip(state))]
pub async fn daily_word_handler(
    State(state): State<GatewayState>,
) -> Result<Json<DailySnapshot>, GatewayError> {
    let snapshot = load_snapshot(&state).await?;
    Ok(Json(DailySnapshot::clone(&snapshot)))
}

#[instrument(skip(state))]
pub async fn top_words_handler(
    State(state): State<GatewayState>,
    Query(query): Query<TopWordsQuery>,
) -> Result<Json<Vec<TopWord>>, GatewayError> {
    let snapshot = load_snapshot(&state).await?;
    let limit = query.limit.unwrap_or(DEFAULT_TOP_WORDS);
    let top = snapshot.top_words(limit);
    debug!(limit, returned = top.len(), "Top words served");
    Ok(Json(top))
}

#[instrument(skip(state, request))]
pub async fn guess_handler(
    State(state): State<GatewayState>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessOutcome>, GatewayError> {
    let guess = request
        .guess
        .map(|g| normalize_guess(&g))
        .filter(|g| !g.is_empty())
        .ok_or_else(|| GatewayError::InvalidRequest("guess is required".to_string()))?;

    let snapshot = load_snapshot(&state).await?;
    let outcome = snapshot
        .evaluate_guess(&guess)
        .ok_or(GatewayError::UnknownWord(guess))?;

    debug!(
        correct = outcome.is_correct,
        rank = ?outcome.rank,
        "Guess evaluated"
    );
    Ok(Json(outcome))
}

#[instrument(skip(state, headers))]
pub async fn generate_daily_word_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
) -> Result<Json<GenerateResponse>, GatewayError> {
    if !state.gate.authorize(&headers) {
        state.gate.log_rejection(&headers);
        return Err(GatewayError::Unauthorized);
    }

    let today = Utc::now().date_naive();
    let pipeline = Arc::clone(&state.pipeline);
    let generation = tokio::task::spawn_blocking(move || pipeline.run(today))
        .await
        .map_err(|e| GatewayError::InternalError(format!("generation task panicked: {}", e)))?
        .map_err(|e| {
            error!(kind = e.kind(), error = %e, "Daily generation failed");
            GatewayError::GenerationFailed(e)
        })?;

    let fresh = generation.is_fresh();
    let snapshot = state.snapshots.replace(generation.snapshot);
    info!(date = %snapshot.date, fresh, "Daily generation triggered over HTTP");

    Ok(Json(GenerateResponse {
        date: snapshot.date.clone(),
        word: snapshot.word.clone(),
        similarities: snapshot.similarities.clone(),
        fresh,
    }))
}
