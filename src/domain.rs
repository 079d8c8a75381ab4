//! Domain models used by the game: modes, tasks, deck, players, phases and grades.

use serde::{Deserialize, Serialize};

/// Length of the track in nodes.
pub const TOTAL_STEPS: usize = 25;
/// Index of the last node; reaching it wins the game.
pub const WINNING_STEPS: u32 = (TOTAL_STEPS - 1) as u32;

/// Which kind of drill the deck is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
  /// Russian prompt, Greek sentence as the answer.
  Translation,
  /// Spoken Greek letters/numbers as the prompt, the assembled code as the answer.
  CodeAssembly,
}

/// One drill item. Immutable once generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub mode: GameMode,
  pub prompt: String,
  pub answer: String,
  pub prompt_label: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
}

/// Remaining tasks for the current game. Draws take from the end.
#[derive(Clone, Debug, Default)]
pub struct Deck {
  tasks: Vec<Task>,
}

impl Deck {
  pub fn new(tasks: Vec<Task>) -> Self {
    Self { tasks }
  }

  pub fn draw(&mut self) -> Option<Task> {
    self.tasks.pop()
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }
}

/// One of the two participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Player {
  pub id: u8,
  pub name: String,
  pub color: String,
  pub position: u32,
}

impl Player {
  /// Apply a movement delta and clamp to the track.
  pub fn advance(&mut self, delta: i32) -> u32 {
    let next = (self.position as i64 + delta as i64).clamp(0, WINNING_STEPS as i64);
    self.position = next as u32;
    self.position
  }

  pub fn has_won(&self) -> bool {
    self.position == WINNING_STEPS
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
  /// No mode chosen yet.
  Setup,
  /// Waiting for the active player to draw.
  TaskReveal,
  /// Prompt shown, answer hidden.
  AnswerCheck,
  /// Answer shown, waiting for the grade.
  Movement,
  /// Terminal until reset.
  Win,
}

impl GamePhase {
  pub fn as_str(&self) -> &'static str {
    match self {
      GamePhase::Setup => "SETUP",
      GamePhase::TaskReveal => "TASK_REVEAL",
      GamePhase::AnswerCheck => "ANSWER_CHECK",
      GamePhase::Movement => "MOVEMENT",
      GamePhase::Win => "WIN",
    }
  }

  /// The renderer may show the answer from this phase on.
  pub fn answer_visible(&self) -> bool {
    matches!(self, GamePhase::Movement | GamePhase::Win)
  }
}

impl std::fmt::Display for GamePhase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Self-assessed error bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
  Correct,
  OneError,
  TwoErrors,
  ThreeOrMore,
}

impl Grade {
  pub fn from_error_count(errors: u32) -> Self {
    match errors {
      0 => Grade::Correct,
      1 => Grade::OneError,
      2 => Grade::TwoErrors,
      _ => Grade::ThreeOrMore,
    }
  }

  pub fn delta(&self) -> i32 {
    match self {
      Grade::Correct => 2,
      Grade::OneError => 1,
      Grade::TwoErrors => 0,
      Grade::ThreeOrMore => -1,
    }
  }
}
