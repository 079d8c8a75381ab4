//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! The snapshot is everything the board renderer needs for one frame.

use serde::{Deserialize, Serialize};

use crate::domain::{GameMode, GamePhase, Player, Task};
use crate::game::{GameError, GameSession};
use crate::layout::{BoardLayout, BoardNode};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  GetState,
  SelectMode {
    mode: GameMode,
  },
  NewGame {
    #[serde(default)]
    mode: Option<GameMode>,
  },
  RequestTask,
  Reveal,
  Grade {
    errors: u32,
  },
  Reset,
}

/// Messages the server sends back (or pushes) over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  State {
    state: GameStateOut,
  },
  Error {
    code: ErrorCode,
    message: String,
  },
}

/// Task as shown to the renderer. `answer` stays empty until MOVEMENT.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOut {
  pub mode: GameMode,
  pub prompt: String,
  pub prompt_label: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub answer: Option<String>,
}

impl TaskOut {
  pub fn from_task(task: &Task, phase: GamePhase) -> Self {
    Self {
      mode: task.mode,
      prompt: task.prompt.clone(),
      prompt_label: task.prompt_label.clone(),
      category: task.category.clone(),
      answer: phase.answer_visible().then(|| task.answer.clone()),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateOut {
  pub phase: GamePhase,
  pub mode: Option<GameMode>,
  pub players: Vec<Player>,
  pub current_player_index: usize,
  pub task: Option<TaskOut>,
  pub winner: Option<Player>,
  pub deck_remaining: usize,
  pub turn_pending: bool,
  pub layout_seed: u32,
  pub layout: BoardLayout,
  /// Node each player's token stands on, by player id.
  pub pawns: Vec<BoardNode>,
}

/// Build the render snapshot. `layout` must belong to the session's seed.
pub fn to_out(session: &GameSession, layout: &BoardLayout) -> GameStateOut {
  let phase = session.phase();
  GameStateOut {
    phase,
    mode: session.mode(),
    players: session.players().to_vec(),
    current_player_index: session.current_player(),
    task: session.current_task().map(|t| TaskOut::from_task(t, phase)),
    winner: session.winner().cloned(),
    deck_remaining: session.deck_remaining(),
    turn_pending: session.turn_pending(),
    layout_seed: session.layout_seed(),
    layout: layout.clone(),
    pawns: session
      .players()
      .iter()
      .filter_map(|p| layout.node_for_position(p.position).copied())
      .collect(),
  }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
  BadRequest,
  WrongPhase,
  NoCurrentTask,
  TurnPending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
  pub code: ErrorCode,
  pub message: String,
}

impl From<GameError> for ApiError {
  fn from(e: GameError) -> Self {
    let code = match e {
      GameError::WrongPhase { .. } => ErrorCode::WrongPhase,
      GameError::NoCurrentTask => ErrorCode::NoCurrentTask,
      GameError::TurnPending => ErrorCode::TurnPending,
    };
    Self { code, message: e.to_string() }
  }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ModeIn {
  pub mode: GameMode,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewGameIn {
  #[serde(default)]
  pub mode: Option<GameMode>,
}

#[derive(Debug, Deserialize)]
pub struct GradeIn {
  pub errors: u32,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[cfg(test)]
mod tests {
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;
  use crate::layout::generate_layout;

  #[test]
  fn parses_client_messages() {
    let msg: ClientWsMessage = serde_json::from_str(r#"{"type":"grade","errors":3}"#).unwrap();
    assert!(matches!(msg, ClientWsMessage::Grade { errors: 3 }));
    let msg: ClientWsMessage =
      serde_json::from_str(r#"{"type":"select_mode","mode":"code_assembly"}"#).unwrap();
    assert!(matches!(msg, ClientWsMessage::SelectMode { mode: GameMode::CodeAssembly }));
    let msg: ClientWsMessage = serde_json::from_str(r#"{"type":"new_game"}"#).unwrap();
    assert!(matches!(msg, ClientWsMessage::NewGame { mode: None }));
  }

  #[test]
  fn answer_hidden_until_revealed() {
    let mut session = GameSession::with_rng(StdRng::seed_from_u64(1));
    session.select_mode(GameMode::Translation).unwrap();
    session.request_task().unwrap();
    let layout = generate_layout(session.layout_seed());

    let before = serde_json::to_value(to_out(&session, &layout)).unwrap();
    assert_eq!(before["phase"], "ANSWER_CHECK");
    assert!(before["task"]["prompt"].is_string());
    assert!(before["task"].get("answer").is_none());

    session.reveal().unwrap();
    let after = serde_json::to_value(to_out(&session, &layout)).unwrap();
    assert!(after["task"]["answer"].is_string());
    assert_eq!(after["task"]["promptLabel"], "Переведи на греческий");
  }

  #[test]
  fn snapshot_carries_players_and_layout() {
    let session = GameSession::with_rng(StdRng::seed_from_u64(2));
    let layout = generate_layout(session.layout_seed());
    let out = serde_json::to_value(to_out(&session, &layout)).unwrap();
    assert_eq!(out["players"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(out["currentPlayerIndex"], 0);
    assert_eq!(out["layout"]["nodes"].as_array().map(|a| a.len()), Some(25));
    assert!(out["winner"].is_null());
    assert_eq!(out["pawns"][0]["index"], 0);
    assert_eq!(out["pawns"][1]["x"], out["layout"]["nodes"][0]["x"]);
  }

  #[test]
  fn game_errors_map_to_codes() {
    let err: ApiError = GameError::TurnPending.into();
    assert_eq!(err.code, ErrorCode::TurnPending);
    assert_eq!(err.message, "this turn was already graded");
  }
}
