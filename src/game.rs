//! Turn/grading state machine.
//!
//! SETUP --select_mode--> TASK_REVEAL --request_task--> ANSWER_CHECK
//!   --reveal--> MOVEMENT --grade--> WIN | (turn switch) TASK_REVEAL
//!
//! A non-winning grade leaves the session in MOVEMENT with a pending
//! `TurnToken`; the switch is applied by `finish_turn` with that token.
//! `reset` and `new_game` invalidate any outstanding token.

use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Deck, GameMode, GamePhase, Grade, Player, Task};
use crate::tasks::build_deck;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
  #[error("cannot {action} during {phase}")]
  WrongPhase { action: &'static str, phase: GamePhase },
  #[error("no task has been drawn")]
  NoCurrentTask,
  #[error("this turn was already graded")]
  TurnPending,
}

/// Identifies one scheduled turn switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnToken(u64);

/// What a grade did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeOutcome {
  Won { player: u8, position: u32 },
  Moved { player: u8, position: u32, token: TurnToken },
}

pub struct GameSession {
  phase: GamePhase,
  mode: Option<GameMode>,
  current_player: usize,
  deck: Deck,
  current_task: Option<Task>,
  winner: Option<u8>,
  layout_seed: u32,
  players: [Player; 2],
  pending_switch: Option<TurnToken>,
  next_token: u64,
  code_deck_size: usize,
  rng: StdRng,
}

impl GameSession {
  pub fn new(identities: [(String, String); 2], code_deck_size: usize, mut rng: StdRng) -> Self {
    let layout_seed = rng.gen::<u32>();
    let [(name0, color0), (name1, color1)] = identities;
    Self {
      phase: GamePhase::Setup,
      mode: None,
      current_player: 0,
      deck: Deck::default(),
      current_task: None,
      winner: None,
      layout_seed,
      players: [
        Player { id: 0, name: name0, color: color0, position: 0 },
        Player { id: 1, name: name1, color: color1, position: 0 },
      ],
      pending_switch: None,
      next_token: 0,
      code_deck_size,
      rng,
    }
  }

  /// Session with the built-in player identities.
  #[cfg(test)]
  pub fn with_rng(rng: StdRng) -> Self {
    use crate::seeds::DEFAULT_PLAYERS;
    use crate::tasks::DEFAULT_CODE_DECK_SIZE;

    let identities = DEFAULT_PLAYERS.map(|(name, color)| (name.to_string(), color.to_string()));
    Self::new(identities, DEFAULT_CODE_DECK_SIZE, rng)
  }

  pub fn phase(&self) -> GamePhase {
    self.phase
  }

  pub fn mode(&self) -> Option<GameMode> {
    self.mode
  }

  pub fn current_player(&self) -> usize {
    self.current_player
  }

  pub fn current_task(&self) -> Option<&Task> {
    self.current_task.as_ref()
  }

  pub fn winner(&self) -> Option<&Player> {
    self.winner.map(|id| &self.players[id as usize])
  }

  pub fn players(&self) -> &[Player; 2] {
    &self.players
  }

  pub fn layout_seed(&self) -> u32 {
    self.layout_seed
  }

  pub fn deck_remaining(&self) -> usize {
    self.deck.len()
  }

  pub fn turn_pending(&self) -> bool {
    self.pending_switch.is_some()
  }

  fn expect_phase(&self, action: &'static str, phase: GamePhase) -> Result<(), GameError> {
    if self.phase == phase {
      Ok(())
    } else {
      Err(GameError::WrongPhase { action, phase: self.phase })
    }
  }

  fn reinitialize(&mut self) {
    for p in self.players.iter_mut() {
      p.position = 0;
    }
    self.current_player = 0;
    self.current_task = None;
    self.winner = None;
    self.pending_switch = None;
    self.layout_seed = self.layout_seed.wrapping_add(1);
  }

  /// Back to SETUP with a fresh board. Valid from any phase.
  pub fn reset(&mut self) {
    self.reinitialize();
    self.mode = None;
    self.deck = Deck::default();
    self.phase = GamePhase::Setup;
    info!(target: "game", layout_seed = self.layout_seed, "Session reset");
  }

  pub fn select_mode(&mut self, mode: GameMode) -> Result<(), GameError> {
    self.expect_phase("select a mode", GamePhase::Setup)?;
    self.reinitialize();
    self.start(mode);
    Ok(())
  }

  /// Reset and, when a mode is given, start playing it immediately.
  pub fn new_game(&mut self, mode: Option<GameMode>) {
    match mode {
      Some(mode) => {
        self.reinitialize();
        self.start(mode);
      }
      None => self.reset(),
    }
  }

  fn start(&mut self, mode: GameMode) {
    self.mode = Some(mode);
    self.deck = build_deck(mode, self.code_deck_size, &mut self.rng);
    self.phase = GamePhase::TaskReveal;
    info!(target: "game", ?mode, deck = self.deck.len(), layout_seed = self.layout_seed, "Game started");
  }

  pub fn request_task(&mut self) -> Result<&Task, GameError> {
    self.expect_phase("draw a task", GamePhase::TaskReveal)?;
    let mode = self.mode.ok_or(GameError::WrongPhase { action: "draw a task", phase: GamePhase::Setup })?;

    if self.deck.is_empty() {
      self.deck = build_deck(mode, self.code_deck_size, &mut self.rng);
      debug!(target: "game", ?mode, deck = self.deck.len(), "Deck exhausted; regenerated");
    }
    let task = self.deck.draw().ok_or(GameError::NoCurrentTask)?;

    self.phase = GamePhase::AnswerCheck;
    debug!(target: "game", player = self.current_player, remaining = self.deck.len(), "Task drawn");
    Ok(&*self.current_task.insert(task))
  }

  pub fn reveal(&mut self) -> Result<(), GameError> {
    self.expect_phase("reveal the answer", GamePhase::AnswerCheck)?;
    self.phase = GamePhase::Movement;
    Ok(())
  }

  pub fn grade(&mut self, grade: Grade) -> Result<GradeOutcome, GameError> {
    self.expect_phase("grade", GamePhase::Movement)?;
    if self.pending_switch.is_some() {
      return Err(GameError::TurnPending);
    }
    if self.current_task.is_none() {
      return Err(GameError::NoCurrentTask);
    }

    let idx = self.current_player;
    let player = &mut self.players[idx];
    let position = player.advance(grade.delta());
    let id = player.id;
    info!(target: "game", player = id, ?grade, position, "Turn graded");

    if player.has_won() {
      self.winner = Some(id);
      self.phase = GamePhase::Win;
      info!(target: "game", player = id, "Player reached the finish");
      return Ok(GradeOutcome::Won { player: id, position });
    }

    let token = TurnToken(self.next_token);
    self.next_token += 1;
    self.pending_switch = Some(token);
    Ok(GradeOutcome::Moved { player: id, position, token })
  }

  /// Apply a scheduled turn switch. Returns false for a stale token.
  pub fn finish_turn(&mut self, token: TurnToken) -> bool {
    if self.pending_switch != Some(token) {
      return false;
    }
    self.pending_switch = None;
    self.current_player = 1 - self.current_player;
    self.current_task = None;
    self.phase = GamePhase::TaskReveal;
    debug!(target: "game", player = self.current_player, "Turn switched");
    true
  }
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;

  use super::*;
  use crate::domain::WINNING_STEPS;
  use crate::seeds::translation_deck_size;
  use crate::tasks::DEFAULT_CODE_DECK_SIZE;

  fn session() -> GameSession {
    GameSession::with_rng(StdRng::seed_from_u64(5))
  }

  fn playing(mode: GameMode) -> GameSession {
    let mut s = session();
    s.select_mode(mode).expect("select mode");
    s
  }

  // Draw, reveal and grade; returns the outcome without finishing the turn.
  fn play_turn(s: &mut GameSession, errors: u32) -> GradeOutcome {
    s.request_task().expect("draw");
    s.reveal().expect("reveal");
    s.grade(Grade::from_error_count(errors)).expect("grade")
  }

  fn finish(s: &mut GameSession, outcome: GradeOutcome) {
    if let GradeOutcome::Moved { token, .. } = outcome {
      assert!(s.finish_turn(token));
    }
  }

  #[test]
  fn starts_in_setup_with_both_players_at_zero() {
    let s = session();
    assert_eq!(s.phase(), GamePhase::Setup);
    assert!(s.players().iter().all(|p| p.position == 0));
    assert_eq!(s.players()[0].name, "Игрок 1");
    assert_eq!(s.players()[1].id, 1);
  }

  #[test]
  fn select_mode_builds_a_deck() {
    let s = playing(GameMode::Translation);
    assert_eq!(s.phase(), GamePhase::TaskReveal);
    assert_eq!(s.deck_remaining(), translation_deck_size());
    assert_eq!(s.mode(), Some(GameMode::Translation));
  }

  #[test]
  fn full_turn_moves_and_switches_player() {
    let mut s = playing(GameMode::CodeAssembly);
    let outcome = play_turn(&mut s, 0);
    assert!(matches!(outcome, GradeOutcome::Moved { player: 0, position: 2, .. }));
    assert_eq!(s.phase(), GamePhase::Movement);
    assert!(s.current_task().is_some());

    finish(&mut s, outcome);
    assert_eq!(s.current_player(), 1);
    assert!(s.current_task().is_none());
    assert_eq!(s.phase(), GamePhase::TaskReveal);
  }

  #[test]
  fn grades_move_by_bucket() {
    for (errors, expected) in [(0, 2), (1, 1), (2, 0), (3, 0), (7, 0)] {
      let mut s = playing(GameMode::Translation);
      let outcome = play_turn(&mut s, errors);
      assert_eq!(s.players()[0].position, expected, "errors={errors}");
      finish(&mut s, outcome);
    }
  }

  #[test]
  fn penalty_after_progress() {
    let mut s = playing(GameMode::Translation);
    let o = play_turn(&mut s, 0);
    finish(&mut s, o);
    let o = play_turn(&mut s, 0);
    finish(&mut s, o);
    let o = play_turn(&mut s, 3);
    assert_eq!(s.players()[0].position, 1);
    finish(&mut s, o);
  }

  #[test]
  fn reaching_the_last_step_wins_without_switching() {
    let mut s = playing(GameMode::Translation);
    loop {
      let outcome = play_turn(&mut s, 0);
      match outcome {
        GradeOutcome::Won { player, position } => {
          assert_eq!(player, 0);
          assert_eq!(position, WINNING_STEPS);
          break;
        }
        moved => finish(&mut s, moved),
      }
    }
    assert_eq!(s.phase(), GamePhase::Win);
    assert_eq!(s.current_player(), 0);
    assert_eq!(s.winner().map(|p| p.id), Some(0));
    assert!(s.players().iter().all(|p| p.position <= WINNING_STEPS));

    assert!(matches!(s.request_task(), Err(GameError::WrongPhase { .. })));
    assert!(matches!(s.grade(Grade::Correct), Err(GameError::WrongPhase { .. })));
  }

  #[test]
  fn out_of_phase_calls_are_rejected_without_mutation() {
    let mut s = session();
    assert_eq!(
      s.request_task().err(),
      Some(GameError::WrongPhase { action: "draw a task", phase: GamePhase::Setup })
    );
    assert!(s.reveal().is_err());
    assert!(s.grade(Grade::Correct).is_err());
    assert_eq!(s.phase(), GamePhase::Setup);

    let mut s = playing(GameMode::Translation);
    assert!(s.grade(Grade::Correct).is_err());
    assert!(s.select_mode(GameMode::CodeAssembly).is_err());
    assert_eq!(s.mode(), Some(GameMode::Translation));
    assert_eq!(s.players()[0].position, 0);
  }

  #[test]
  fn double_grade_is_rejected_while_switch_pending() {
    let mut s = playing(GameMode::Translation);
    play_turn(&mut s, 0);
    assert_eq!(s.grade(Grade::Correct), Err(GameError::TurnPending));
    assert_eq!(s.players()[0].position, 2);
  }

  #[test]
  fn stale_token_is_ignored_after_reset() {
    let mut s = playing(GameMode::Translation);
    let outcome = play_turn(&mut s, 1);
    let GradeOutcome::Moved { token, .. } = outcome else {
      panic!("expected a move");
    };
    s.reset();
    assert!(!s.finish_turn(token));
    assert_eq!(s.phase(), GamePhase::Setup);
    assert_eq!(s.current_player(), 0);
  }

  #[test]
  fn token_applies_once() {
    let mut s = playing(GameMode::Translation);
    let GradeOutcome::Moved { token, .. } = play_turn(&mut s, 2) else {
      panic!("expected a move");
    };
    assert!(s.finish_turn(token));
    assert!(!s.finish_turn(token));
    assert_eq!(s.current_player(), 1);
  }

  #[test]
  fn empty_deck_is_regenerated_on_draw() {
    let mut s = playing(GameMode::CodeAssembly);
    for _ in 0..DEFAULT_CODE_DECK_SIZE {
      let o = play_turn(&mut s, 2);
      finish(&mut s, o);
    }
    assert_eq!(s.deck_remaining(), 0);
    s.request_task().expect("draw from regenerated deck");
    assert_eq!(s.deck_remaining(), DEFAULT_CODE_DECK_SIZE - 1);
  }

  #[test]
  fn empty_translation_deck_is_rebuilt_in_full() {
    let mut s = playing(GameMode::Translation);
    let size = translation_deck_size();
    for _ in 0..size {
      let o = play_turn(&mut s, 2);
      finish(&mut s, o);
    }
    assert_eq!(s.deck_remaining(), 0);
    s.request_task().expect("draw from rebuilt deck");
    assert_eq!(s.deck_remaining(), size - 1);
  }

  #[test]
  fn second_player_can_win() {
    let mut s = playing(GameMode::CodeAssembly);
    loop {
      // player 0 keeps failing, player 1 answers perfectly
      let errors = if s.current_player() == 0 { 3 } else { 0 };
      match play_turn(&mut s, errors) {
        GradeOutcome::Won { player, position } => {
          assert_eq!(player, 1);
          assert_eq!(position, WINNING_STEPS);
          break;
        }
        moved => finish(&mut s, moved),
      }
    }
    assert_eq!(s.phase(), GamePhase::Win);
    assert_eq!(s.current_player(), 1);
    assert_eq!(s.winner().map(|p| p.id), Some(1));
    assert_eq!(s.players()[0].position, 0);
  }

  #[test]
  fn reset_reinitializes_everything() {
    let mut s = playing(GameMode::Translation);
    let seed = s.layout_seed();
    let o = play_turn(&mut s, 0);
    finish(&mut s, o);
    play_turn(&mut s, 0);

    s.reset();
    assert_eq!(s.phase(), GamePhase::Setup);
    assert!(s.players().iter().all(|p| p.position == 0));
    assert!(s.winner().is_none());
    assert!(s.current_task().is_none());
    assert_eq!(s.current_player(), 0);
    assert_ne!(s.layout_seed(), seed);
    assert_eq!(s.deck_remaining(), 0);
    assert!(s.mode().is_none());
  }

  #[test]
  fn new_game_with_mode_skips_setup() {
    let mut s = playing(GameMode::Translation);
    play_turn(&mut s, 0);
    let seed = s.layout_seed();
    s.new_game(Some(GameMode::CodeAssembly));
    assert_eq!(s.phase(), GamePhase::TaskReveal);
    assert_eq!(s.mode(), Some(GameMode::CodeAssembly));
    assert_eq!(s.deck_remaining(), DEFAULT_CODE_DECK_SIZE);
    assert!(!s.turn_pending());
    assert!(s.players().iter().all(|p| p.position == 0));
    assert_ne!(s.layout_seed(), seed);
  }
}
