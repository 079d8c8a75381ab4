//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! Every UI input event becomes a `GameAction` and goes through `perform`,
//! so both transports log and reject out-of-phase actions the same way.

use tracing::{info, instrument, warn};

use crate::domain::GameMode;
use crate::game::GameError;
use crate::protocol::GameStateOut;
use crate::state::AppState;

/// Input events accepted from the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
  SelectMode(GameMode),
  NewGame(Option<GameMode>),
  RequestTask,
  Reveal,
  Grade { errors: u32 },
  Reset,
}

impl GameAction {
  pub fn name(&self) -> &'static str {
    match self {
      GameAction::SelectMode(_) => "select_mode",
      GameAction::NewGame(_) => "new_game",
      GameAction::RequestTask => "request_task",
      GameAction::Reveal => "reveal",
      GameAction::Grade { .. } => "grade",
      GameAction::Reset => "reset",
    }
  }
}

#[instrument(level = "info", skip(state), fields(kind = action.name()))]
pub async fn perform(state: &AppState, action: GameAction) -> Result<GameStateOut, GameError> {
  let result = match action {
    GameAction::SelectMode(mode) => state.select_mode(mode).await,
    GameAction::NewGame(mode) => Ok(state.new_game(mode).await),
    GameAction::RequestTask => state.request_task().await,
    GameAction::Reveal => state.reveal().await,
    GameAction::Grade { errors } => state.grade(errors).await,
    GameAction::Reset => Ok(state.reset().await),
  };

  match &result {
    Ok(out) => info!(
      target: "game",
      action = action.name(),
      phase = %out.phase,
      player = out.current_player_index,
      "Action applied"
    ),
    Err(e) => warn!(target: "game", action = action.name(), error = %e, "Action rejected"),
  }
  result
}
