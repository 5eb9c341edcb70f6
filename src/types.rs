use serde::{Deserialize, Serialize};

pub const MIN_DIMENSION: usize = 10;
pub const MAX_DIMENSION: usize = 19;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Player {
  B,
  W,
}

impl Player {
  pub fn other(self) -> Self {
    match self {
      Player::B => Player::W,
      Player::W => Player::B,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Player::B => "black",
      Player::W => "white",
    }
  }
}

/// Content of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
  Blank,
  Black,
  White,
}

impl Cell {
  pub fn player(self) -> Option<Player> {
    match self {
      Cell::Blank => None,
      Cell::Black => Some(Player::B),
      Cell::White => Some(Player::W),
    }
  }

  pub fn is_blank(self) -> bool {
    self == Cell::Blank
  }

  /// Token used by the save file format.
  pub fn token(self) -> char {
    match self {
      Cell::Blank => 'X',
      Cell::Black => 'B',
      Cell::White => 'W',
    }
  }

  pub fn from_token(token: char) -> Option<Self> {
    match token {
      'X' => Some(Cell::Blank),
      'B' => Some(Cell::Black),
      'W' => Some(Cell::White),
      _ => None,
    }
  }
}

impl From<Player> for Cell {
  fn from(player: Player) -> Self {
    match player {
      Player::B => Cell::Black,
      Player::W => Cell::White,
    }
  }
}

/// Column (`x`) and row (`y`) of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coord {
  pub x: usize,
  pub y: usize,
}

impl Coord {
  pub fn new(x: usize, y: usize) -> Self {
    Self { x, y }
  }

  pub fn manhattan(self, other: Coord) -> usize {
    self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Off,
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn from_level(level: u8) -> Option<Self> {
    match level {
      0 => Some(Difficulty::Off),
      1 => Some(Difficulty::Easy),
      2 => Some(Difficulty::Medium),
      3 => Some(Difficulty::Hard),
      _ => None,
    }
  }

  pub fn level(self) -> u8 {
    match self {
      Difficulty::Off => 0,
      Difficulty::Easy => 1,
      Difficulty::Medium => 2,
      Difficulty::Hard => 3,
    }
  }
}

impl Default for Difficulty {
  fn default() -> Self {
    Difficulty::Easy
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSetKind {
  ExactFive,
}

impl Default for RuleSetKind {
  fn default() -> Self {
    RuleSetKind::ExactFive
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  AwaitingHuman,
  ComputerMoving,
  Won,
  BoardFull,
}

/// A completed run. `start` and `end` are the outermost stones of the run,
/// `direction` points from `end` towards `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinLine {
  pub start: Coord,
  pub end: Coord,
  pub direction: (i32, i32),
  pub length: usize,
}

impl WinLine {
  /// Cells one step past each end of the run. These may lie off the board.
  pub fn beyond(&self) -> [(i64, i64); 2] {
    let (dx, dy) = (self.direction.0 as i64, self.direction.1 as i64);
    [
      (self.start.x as i64 + dx, self.start.y as i64 + dy),
      (self.end.x as i64 - dx, self.end.y as i64 - dy),
    ]
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
  pub winner: Player,
  pub human_won: bool,
  pub line: WinLine,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
  pub board_size: usize,
  pub board: Vec<Cell>,
  pub to_move: Player,
  pub human: Player,
  pub computer: Player,
  pub difficulty: Difficulty,
  pub move_count: u32,
  pub phase: Phase,
  pub outcome: Option<GameOutcome>,
  pub can_human_move: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tokens_round_trip() {
    for cell in [Cell::Blank, Cell::Black, Cell::White] {
      assert_eq!(Cell::from_token(cell.token()), Some(cell));
    }
    assert_eq!(Cell::from_token('.'), None);
  }

  #[test]
  fn difficulty_levels() {
    assert_eq!(Difficulty::from_level(3), Some(Difficulty::Hard));
    assert_eq!(Difficulty::from_level(4), None);
    assert_eq!(Difficulty::Medium.level(), 2);
  }

  #[test]
  fn win_line_beyond() {
    let line = WinLine {
      start: Coord::new(5, 5),
      end: Coord::new(5, 9),
      direction: (0, -1),
      length: 5,
    };
    assert_eq!(line.beyond(), [(5, 4), (5, 10)]);
  }
}
