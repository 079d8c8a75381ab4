//! Application state: the single game session, its board layout and the
//! change feed for WebSocket clients.
//!
//! This module owns:
//!   - the `GameSession` (behind a tokio Mutex; one writer at a time)
//!   - the layout computed for the session's current seed
//!   - the delayed turn switch, scheduled as a task carrying a `TurnToken`
//!   - a broadcast channel of snapshots pushed after every applied change
//!
//! All session mutation goes through the methods here.

use std::{sync::Arc, time::Duration};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, instrument};

use crate::config::{load_game_config_from_env, GameConfig};
use crate::domain::{GameMode, Grade};
use crate::game::{GameError, GameSession, GradeOutcome, TurnToken};
use crate::layout::{generate_layout, BoardLayout};
use crate::protocol::{to_out, GameStateOut};

const EVENT_BUFFER: usize = 64;

/// Session plus the layout derived from its seed.
struct Table {
  session: GameSession,
  layout: BoardLayout,
}

impl Table {
  fn new(session: GameSession) -> Self {
    let layout = generate_layout(session.layout_seed());
    Self { session, layout }
  }

  /// Regenerate the layout only when the seed moved (new game / reset).
  fn sync_layout(&mut self) {
    let seed = self.session.layout_seed();
    if self.layout.seed != seed {
      self.layout = generate_layout(seed);
      debug!(target: "game", seed, decorations = self.layout.decorations.len(), "Board layout generated");
    }
  }

  fn snapshot(&self) -> GameStateOut {
    to_out(&self.session, &self.layout)
  }
}

pub struct AppState {
  table: Arc<Mutex<Table>>,
  events: broadcast::Sender<GameStateOut>,
  pub config: GameConfig,
}

impl AppState {
  /// Build state from env: load config, seed the RNG from entropy.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    let config = load_game_config_from_env();
    info!(
      target: "greek_journey",
      turn_delay_ms = config.turn_delay_ms,
      code_deck_size = config.code_deck_size,
      "Game config ready"
    );
    Self::with_config(config, StdRng::from_entropy())
  }

  pub fn with_config(config: GameConfig, rng: StdRng) -> Self {
    let session = GameSession::new(config.player_identities(), config.code_deck_size, rng);
    let (events, _) = broadcast::channel(EVENT_BUFFER);
    Self { table: Arc::new(Mutex::new(Table::new(session))), events, config }
  }

  pub fn subscribe(&self) -> broadcast::Receiver<GameStateOut> {
    self.events.subscribe()
  }

  pub async fn snapshot(&self) -> GameStateOut {
    self.table.lock().await.snapshot()
  }

  pub async fn layout(&self) -> BoardLayout {
    self.table.lock().await.layout.clone()
  }

  // Snapshot, push to subscribers, hand back to the caller.
  fn publish(&self, table: &mut Table) -> GameStateOut {
    table.sync_layout();
    let out = table.snapshot();
    // No subscribers is fine.
    let _ = self.events.send(out.clone());
    out
  }

  #[instrument(level = "info", skip(self))]
  pub async fn new_game(&self, mode: Option<GameMode>) -> GameStateOut {
    let mut table = self.table.lock().await;
    table.session.new_game(mode);
    self.publish(&mut table)
  }

  #[instrument(level = "info", skip(self))]
  pub async fn select_mode(&self, mode: GameMode) -> Result<GameStateOut, GameError> {
    let mut table = self.table.lock().await;
    table.session.select_mode(mode)?;
    Ok(self.publish(&mut table))
  }

  #[instrument(level = "info", skip(self))]
  pub async fn request_task(&self) -> Result<GameStateOut, GameError> {
    let mut table = self.table.lock().await;
    table.session.request_task()?;
    Ok(self.publish(&mut table))
  }

  #[instrument(level = "info", skip(self))]
  pub async fn reveal(&self) -> Result<GameStateOut, GameError> {
    let mut table = self.table.lock().await;
    table.session.reveal()?;
    Ok(self.publish(&mut table))
  }

  /// Grade the active player's answer. A non-winning grade schedules the turn
  /// switch after the configured delay (immediately when the delay is zero).
  #[instrument(level = "info", skip(self))]
  pub async fn grade(&self, errors: u32) -> Result<GameStateOut, GameError> {
    let mut table = self.table.lock().await;
    let outcome = table.session.grade(Grade::from_error_count(errors))?;

    match outcome {
      GradeOutcome::Won { player, position } => {
        info!(target: "game", player, position, "Game won");
      }
      GradeOutcome::Moved { player, position, token } => {
        let delay = self.config.turn_delay();
        debug!(target: "game", player, position, delay_ms = delay.as_millis() as u64, "Turn switch scheduled");
        if delay.is_zero() {
          table.session.finish_turn(token);
        } else {
          self.schedule_turn_switch(token, delay);
        }
      }
    }
    Ok(self.publish(&mut table))
  }

  #[instrument(level = "info", skip(self))]
  pub async fn reset(&self) -> GameStateOut {
    let mut table = self.table.lock().await;
    table.session.reset();
    self.publish(&mut table)
  }

  fn schedule_turn_switch(&self, token: TurnToken, delay: Duration) {
    let table = Arc::clone(&self.table);
    let events = self.events.clone();
    tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      let mut table = table.lock().await;
      if table.session.finish_turn(token) {
        let _ = events.send(table.snapshot());
      } else {
        debug!(target: "game", ?token, "Stale turn switch dropped");
      }
    });
  }
}
