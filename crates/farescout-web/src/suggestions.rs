//! Destination suggestion route.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use farescout_core::{SuggestionRequest, SuggestionResponse};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/suggestions", post(suggest))
}

async fn suggest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let user = state
        .authenticator
        .authenticate(bearer_token(&headers))
        .await
        .map_err(|_| ApiError::Unauthorized)?;

    let span = tracing::info_span!(
        "suggestion_search",
        request_id = %Uuid::new_v4(),
        user = %user.user_id,
        location = %request.starting_location,
        budget = request.budget_per_person,
    );

    async {
        let response = state.engine.suggest(&request).await?;
        Ok(Json(response))
    }
    .instrument(span)
    .await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
