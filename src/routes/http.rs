//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Rejected actions come back as 409 with an `ApiError` body.

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::instrument;

use crate::logic::{perform, GameAction};
use crate::protocol::*;
use crate::state::AppState;

type ActionResult = Result<Json<GameStateOut>, (StatusCode, Json<ApiError>)>;

async fn run(state: &AppState, action: GameAction) -> ActionResult {
  perform(state, action)
    .await
    .map(Json)
    .map_err(|e| (StatusCode::CONFLICT, Json(ApiError::from(e))))
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.snapshot().await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_layout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.layout().await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_mode(State(state): State<Arc<AppState>>, Json(body): Json<ModeIn>) -> ActionResult {
  run(&state, GameAction::SelectMode(body.mode)).await
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_new_game(
  State(state): State<Arc<AppState>>,
  body: Option<Json<NewGameIn>>,
) -> ActionResult {
  let mode = body.and_then(|Json(b)| b.mode);
  run(&state, GameAction::NewGame(mode)).await
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_task(State(state): State<Arc<AppState>>) -> ActionResult {
  run(&state, GameAction::RequestTask).await
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reveal(State(state): State<Arc<AppState>>) -> ActionResult {
  run(&state, GameAction::Reveal).await
}

#[instrument(level = "info", skip(state), fields(errors = body.errors))]
pub async fn http_post_grade(State(state): State<Arc<AppState>>, Json(body): Json<GradeIn>) -> ActionResult {
  run(&state, GameAction::Grade { errors: body.errors }).await
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reset(State(state): State<Arc<AppState>>) -> ActionResult {
  run(&state, GameAction::Reset).await
}
