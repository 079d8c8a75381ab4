//! Procedural board layout: a jittered serpentine track plus decorative scatter.
//!
//! Coordinates live in a 100×100 view box with y growing downwards, so node 0
//! sits bottom-left and the last node near the top. Everything here is a pure
//! function of the seed.

use serde::Serialize;

use crate::domain::TOTAL_STEPS;

pub const GRID_COLS: usize = 5;
pub const GRID_ROWS: usize = 5;
pub const VIEW_SIZE: f64 = 100.0;
/// Max jitter as a fraction of the cell, spread around the center.
pub const JITTER: f64 = 0.6;
pub const DECORATION_CANDIDATES: usize = 15;
pub const MIN_CLEARANCE: f64 = 8.0;

// Offsets the hash input per seed; seed 0 keeps the classic board.
const SEED_STRIDE: f64 = 7919.0;

const DECORATION_TABLE: [DecorationKind; 6] = [
  DecorationKind::Tree,
  DecorationKind::Tree,
  DecorationKind::Mountain,
  DecorationKind::Cloud,
  DecorationKind::Tent,
  DecorationKind::Flower,
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoardNode {
  pub index: usize,
  pub x: f64,
  pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
  Tree,
  Mountain,
  Cloud,
  Tent,
  Flower,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DecorationMarker {
  pub id: usize,
  pub x: f64,
  pub y: f64,
  pub kind: DecorationKind,
  pub scale: f64,
  pub rotation: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardLayout {
  pub seed: u32,
  pub nodes: Vec<BoardNode>,
  pub decorations: Vec<DecorationMarker>,
}

impl BoardLayout {
  /// Node a player standing on `position` is drawn at.
  pub fn node_for_position(&self, position: u32) -> Option<&BoardNode> {
    self.nodes.get(position as usize)
  }
}

/// Sine hash in [0, 1).
pub fn seeded_random(v: f64) -> f64 {
  let x = v.sin() * 10000.0;
  x - x.floor()
}

fn hash(seed: u32, n: usize) -> f64 {
  seeded_random(n as f64 + seed as f64 * SEED_STRIDE)
}

pub fn path_node(seed: u32, index: usize) -> BoardNode {
  let x_step = VIEW_SIZE / GRID_COLS as f64;
  let y_step = VIEW_SIZE / GRID_ROWS as f64;
  let row = index / GRID_COLS;
  let col = index % GRID_COLS;
  let col = if row % 2 == 0 { col } else { GRID_COLS - 1 - col };

  let base_x = col as f64 * x_step + x_step / 2.0;
  let base_y = (GRID_ROWS - 1 - row) as f64 * y_step + y_step / 2.0;

  let dx = (hash(seed, index * 13) - 0.5) * (x_step * JITTER);
  let dy = (hash(seed, index * 7) - 0.5) * (y_step * JITTER);

  BoardNode { index, x: base_x + dx, y: base_y + dy }
}

fn too_close(nodes: &[BoardNode], x: f64, y: f64) -> bool {
  nodes.iter().any(|n| (n.x - x).hypot(n.y - y) < MIN_CLEARANCE)
}

pub fn generate_layout(seed: u32) -> BoardLayout {
  let nodes: Vec<BoardNode> = (0..TOTAL_STEPS).map(|i| path_node(seed, i)).collect();

  let decorations = (0..DECORATION_CANDIDATES)
    .filter_map(|k| {
      let x = hash(seed, k * 123) * VIEW_SIZE;
      let y = hash(seed, k * 456) * VIEW_SIZE;
      if too_close(&nodes, x, y) {
        return None;
      }
      let slot = (hash(seed, k * 99) * DECORATION_TABLE.len() as f64) as usize;
      Some(DecorationMarker {
        id: k,
        x,
        y,
        kind: DECORATION_TABLE[slot.min(DECORATION_TABLE.len() - 1)],
        scale: 0.5 + hash(seed, k * 88) * 0.8,
        rotation: (hash(seed, k * 22) - 0.5) * 20.0,
      })
    })
    .collect();

  BoardLayout { seed, nodes, decorations }
}
