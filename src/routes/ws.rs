//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic; the reply is a single JSON message. Snapshots
//! broadcast by the session (including delayed turn switches) are pushed too.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, instrument, warn};

use crate::logic::{perform, GameAction};
use crate::protocol::{ApiError, ClientWsMessage, ErrorCode, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "greek_journey", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn send(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "code": "bad_request", "message": format!("Serialization error: {}", e) }).to_string()
  });
  match socket.send(Message::Text(out)).await {
    Ok(()) => true,
    Err(e) => {
      error!(target: "greek_journey", error = %e, "WS send error");
      false
    }
  }
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "greek_journey", "WebSocket connected");
  let mut updates = state.subscribe();

  let hello = ServerWsMessage::State { state: state.snapshot().await };
  if !send(&mut socket, &hello).await {
    return;
  }

  loop {
    tokio::select! {
      incoming = socket.recv() => {
        let Some(Ok(msg)) = incoming else { break };
        match msg {
          Message::Text(txt) => {
            let reply = match serde_json::from_str::<ClientWsMessage>(&txt) {
              Ok(incoming) => {
                debug!(target: "greek_journey", "WS received: {:?}", &incoming);
                handle_client_ws(incoming, &state).await
              }
              Err(e) => Some(ServerWsMessage::Error {
                code: ErrorCode::BadRequest,
                message: format!("Invalid JSON: {}", e),
              }),
            };
            if let Some(reply) = reply {
              if !send(&mut socket, &reply).await {
                break;
              }
            }
          }
          Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
          Message::Close(_) => break,
          _ => {}
        }
      }
      update = updates.recv() => {
        match update {
          Ok(snapshot) => {
            if !send(&mut socket, &ServerWsMessage::State { state: snapshot }).await {
              break;
            }
          }
          Err(RecvError::Lagged(skipped)) => {
            warn!(target: "greek_journey", skipped, "WS client lagging; sending fresh state");
            let fresh = ServerWsMessage::State { state: state.snapshot().await };
            if !send(&mut socket, &fresh).await {
              break;
            }
          }
          Err(RecvError::Closed) => break,
        }
      }
    }
  }
  info!(target: "greek_journey", "WebSocket disconnected");
}

/// Map a client message to a direct reply. Accepted actions get none: their
/// snapshot reaches every socket, this one included, through the broadcast.
#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> Option<ServerWsMessage> {
  let action = match msg {
    ClientWsMessage::Ping => return Some(ServerWsMessage::Pong),
    ClientWsMessage::GetState => return Some(ServerWsMessage::State { state: state.snapshot().await }),
    ClientWsMessage::SelectMode { mode } => GameAction::SelectMode(mode),
    ClientWsMessage::NewGame { mode } => GameAction::NewGame(mode),
    ClientWsMessage::RequestTask => GameAction::RequestTask,
    ClientWsMessage::Reveal => GameAction::Reveal,
    ClientWsMessage::Grade { errors } => GameAction::Grade { errors },
    ClientWsMessage::Reset => GameAction::Reset,
  };

  match perform(state, action).await {
    Ok(_) => None,
    Err(e) => {
      let ApiError { code, message } = e.into();
      Some(ServerWsMessage::Error { code, message })
    }
  }
}
