//! Greek Journey · two-player board game backend
//!
//! - Turn/grading state machine for one shared hot-seat session
//! - Axum HTTP + WebSocket API for the board renderer
//! - Static board UI (./static/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 3000)
//!   GAME_CONFIG_PATH : path to TOML config (turn delay, code deck size, players)
//!   TURN_DELAY_MS    : overrides the pause before the turn switch
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

mod config;
mod domain;
mod game;
mod layout;
mod logic;
mod numerals;
mod protocol;
mod routes;
mod seeds;
mod state;
mod tasks;
mod telemetry;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "greek_journey", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "greek_journey", error = %e, "Failed to listen for ctrl-c");
  }
  info!(target: "greek_journey", "Shutting down");
}
