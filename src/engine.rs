use std::fmt;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::ai::{self, Placement};
use crate::error::{InvalidDifficulty, LoadError, MoveError, SaveError};
use crate::events::{self, GameEvent, GameListener};
use crate::patterns::PatternLibrary;
use crate::rules::{rules_for, RuleSet};
use crate::save::{self, SaveData};
use crate::settings::GameSettings;
use crate::types::{
  Cell, Coord, Difficulty, GameOutcome, GameSnapshot, Phase, Player, RuleSetKind, MAX_DIMENSION,
  MIN_DIMENSION,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
  size: usize,
  cells: Vec<Cell>,
}

impl Board {
  pub fn new(size: usize) -> Self {
    Self {
      size,
      cells: vec![Cell::Blank; size * size],
    }
  }

  /// Builds a board from row-major cells. Missing cells are blank, extra ones dropped.
  pub fn from_cells(size: usize, mut cells: Vec<Cell>) -> Self {
    cells.resize(size * size, Cell::Blank);
    Self { size, cells }
  }

  pub fn size(&self) -> usize {
    self.size
  }

  pub fn in_bounds(&self, x: usize, y: usize) -> bool {
    x < self.size && y < self.size
  }

  pub fn index(&self, x: usize, y: usize) -> usize {
    y * self.size + x
  }

  pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
    if !self.in_bounds(x, y) {
      return None;
    }
    Some(self.cells[self.index(x, y)])
  }

  pub fn is_empty(&self, x: usize, y: usize) -> bool {
    self.get(x, y) == Some(Cell::Blank)
  }

  /// False when either axis is outside `0..size` or the cell holds a stone.
  pub fn is_valid_placement(&self, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 {
      return false;
    }
    self.is_empty(x as usize, y as usize)
  }

  /// Stones are never removed, so only blank cells accept a piece.
  pub fn place(&mut self, coord: Coord, player: Player) -> Result<(), MoveError> {
    match self.get(coord.x, coord.y) {
      None => Err(MoveError::OutOfBounds {
        x: coord.x as i64,
        y: coord.y as i64,
      }),
      Some(Cell::Blank) => {
        let idx = self.index(coord.x, coord.y);
        self.cells[idx] = Cell::from(player);
        Ok(())
      }
      Some(_) => Err(MoveError::Occupied {
        x: coord.x,
        y: coord.y,
      }),
    }
  }

  /// Stones of `player`, column by column.
  pub fn pieces_of(&self, player: Player) -> Vec<Coord> {
    let target = Cell::from(player);
    let mut pieces = Vec::new();
    for x in 0..self.size {
      for y in 0..self.size {
        if self.cells[self.index(x, y)] == target {
          pieces.push(Coord { x, y });
        }
      }
    }
    pieces
  }

  pub fn is_full(&self) -> bool {
    self.cells.iter().all(|cell| !cell.is_blank())
  }

  pub fn cells(&self) -> Vec<Cell> {
    self.cells.clone()
  }
}

impl fmt::Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "   ")?;
    for x in 0..self.size {
      write!(f, "{:>3}", x)?;
    }
    writeln!(f)?;
    for y in 0..self.size {
      write!(f, "{:>3}", y)?;
      for x in 0..self.size {
        let symbol = match self.cells[self.index(x, y)] {
          Cell::Blank => '.',
          Cell::Black => 'B',
          Cell::White => 'W',
        };
        write!(f, "{:>3}", symbol)?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

/// Fixed choices for a game instead of the random draw.
#[derive(Clone, Copy, Debug)]
pub struct GameSetup {
  pub dimension: usize,
  pub human: Player,
  pub difficulty: Difficulty,
}

/// What a single human click led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
  pub human: Coord,
  pub computer: Option<Placement>,
  pub outcome: Option<GameOutcome>,
}

/// Owns the board and drives turns. Black always moves first.
pub struct GameState {
  board: Board,
  rules: Box<dyn RuleSet>,
  human: Player,
  to_move: Player,
  difficulty: Difficulty,
  library: PatternLibrary,
  move_count: u32,
  outcome: Option<GameOutcome>,
  rng: StdRng,
  listeners: Vec<Box<dyn GameListener>>,
}

impl GameState {
  /// A fresh game with a random dimension and colour assignment.
  pub fn new(settings: &GameSettings) -> Self {
    let rng = match settings.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    let mut game = Self::idle(settings.rule_set, settings.difficulty, rng);
    game.new_game();
    game
  }

  /// A fresh game with the given dimension and colours.
  pub fn with_setup(setup: GameSetup, rng: StdRng) -> Self {
    let mut game = Self::idle(RuleSetKind::default(), setup.difficulty, rng);
    game.start(setup.dimension.clamp(MIN_DIMENSION, MAX_DIMENSION), setup.human);
    game
  }

  fn idle(rule_set: RuleSetKind, difficulty: Difficulty, rng: StdRng) -> Self {
    Self {
      board: Board::new(MIN_DIMENSION),
      rules: rules_for(rule_set),
      human: Player::B,
      to_move: Player::B,
      difficulty,
      library: PatternLibrary::new(difficulty, Player::W),
      move_count: 0,
      outcome: None,
      rng,
      listeners: Vec::new(),
    }
  }

  pub fn subscribe(&mut self, listener: impl GameListener + 'static) {
    self.listeners.push(Box::new(listener));
  }

  fn emit(&mut self, event: GameEvent) {
    for listener in self.listeners.iter_mut() {
      listener.on_event(&event);
    }
  }

  fn say(&mut self, text: &str) {
    self.emit(GameEvent::message(text));
  }

  /// Draws a new dimension and colour assignment and starts over.
  pub fn new_game(&mut self) {
    let dimension = self.rng.gen_range(MIN_DIMENSION..=MAX_DIMENSION);
    let human = if self.rng.gen_bool(0.5) { Player::B } else { Player::W };
    self.start(dimension, human);
  }

  fn start(&mut self, dimension: usize, human: Player) {
    self.board = Board::new(dimension);
    self.human = human;
    self.to_move = Player::B;
    self.move_count = 0;
    self.outcome = None;
    self.rebuild_library();
    info!(dimension, human = human.name(), difficulty = self.difficulty.level(), "new game");

    self.emit(GameEvent::NewGame { dimension, human });
    self.say(events::MSG_NEW_GAME);

    if self.to_move == self.computer() {
      self.computer_move();
    }
  }

  fn rebuild_library(&mut self) {
    self.library = PatternLibrary::new(self.difficulty, self.computer());
  }

  /// Places the human's stone and, unless that ends the game, answers with the computer's.
  pub fn human_click(&mut self, x: usize, y: usize) -> Result<TurnReport, MoveError> {
    if self.outcome.is_some() || self.board.is_full() {
      return Err(MoveError::GameOver);
    }
    if self.to_move != self.human {
      return Err(MoveError::NotYourTurn);
    }

    let coord = Coord { x, y };
    if !self.rules.is_legal(&self.board, coord) {
      self.say(events::MSG_BAD_PLACEMENT);
      return Err(if self.board.in_bounds(x, y) {
        MoveError::Occupied { x, y }
      } else {
        MoveError::OutOfBounds {
          x: x as i64,
          y: y as i64,
        }
      });
    }

    self.board.place(coord, self.human)?;
    self.move_count += 1;
    self.emit(GameEvent::MoveApplied {
      player: self.human,
      coord,
      by_human: true,
    });

    if let Some(outcome) = self.check_win(coord, self.human) {
      return Ok(TurnReport {
        human: coord,
        computer: None,
        outcome: Some(outcome),
      });
    }
    if self.board.is_full() {
      self.announce_full();
      return Ok(TurnReport {
        human: coord,
        computer: None,
        outcome: None,
      });
    }

    self.to_move = self.computer();
    let computer = self.computer_move();
    Ok(TurnReport {
      human: coord,
      computer,
      outcome: self.outcome,
    })
  }

  // Always hands the turn back to the human, even when nothing is placed.
  fn computer_move(&mut self) -> Option<Placement> {
    let computer = self.computer();
    if self.difficulty == Difficulty::Off {
      self.to_move = self.human;
      return None;
    }

    let placement = ai::choose_move(&self.board, &self.library, self.difficulty, &mut self.rng);
    debug!(x = placement.coord.x, y = placement.coord.y, kind = ?placement.kind, "computer move");

    if let Err(err) = self.board.place(placement.coord, computer) {
      warn!(%err, "computer forfeits its move");
      self.to_move = self.human;
      return None;
    }
    self.emit(GameEvent::MoveApplied {
      player: computer,
      coord: placement.coord,
      by_human: false,
    });

    self.to_move = self.human;
    if self.check_win(placement.coord, computer).is_none() && self.board.is_full() {
      self.announce_full();
    }
    Some(placement)
  }

  fn announce_full(&mut self) {
    info!(move_count = self.move_count, "board is full");
    self.say(events::MSG_BOARD_FULL);
  }

  fn check_win(&mut self, coord: Coord, player: Player) -> Option<GameOutcome> {
    let line = self.rules.check_win(&self.board, coord, player)?;
    let outcome = GameOutcome {
      winner: player,
      human_won: player == self.human,
      line,
    };
    info!(winner = player.name(), human_won = outcome.human_won, "game won");
    self.outcome = Some(outcome);
    self.emit(GameEvent::Won(outcome));
    Some(outcome)
  }

  pub fn set_difficulty(&mut self, level: u8) -> Result<(), InvalidDifficulty> {
    let difficulty = Difficulty::from_level(level).ok_or(InvalidDifficulty(level))?;
    self.difficulty = difficulty;
    self.rebuild_library();
    info!(level, "difficulty changed");
    self.emit(GameEvent::DifficultyChanged { difficulty });
    Ok(())
  }

  pub fn save_data(&self) -> SaveData {
    SaveData {
      move_count: self.move_count,
      human: self.human,
      difficulty: self.difficulty,
      board: self.board.clone(),
    }
  }

  pub fn save_game(&mut self, path: &Path) -> Result<(), SaveError> {
    if self.outcome.is_some() {
      self.say(events::MSG_SAVE_FINISHED);
      return Err(SaveError::GameFinished);
    }
    if let Err(err) = save::write(path, &self.save_data()) {
      warn!(path = %path.display(), %err, "save failed");
      self.say(events::MSG_SAVE_FAILED);
      return Err(err);
    }
    info!(path = %path.display(), "game saved");
    self.say(events::MSG_SAVED);
    Ok(())
  }

  /// Replaces the current game with the saved one. The human always moves next.
  pub fn load_game(&mut self, path: &Path) -> Result<(), LoadError> {
    let data = match save::read(path) {
      Ok(data) => data,
      Err(err) => {
        warn!(path = %path.display(), %err, "load failed");
        let text = match err {
          LoadError::NotFound => events::MSG_NO_SAVE,
          LoadError::Malformed(_) => events::MSG_CORRUPT_SAVE,
          LoadError::Io(_) => events::MSG_LOAD_FAILED,
        };
        self.say(text);
        return Err(err);
      }
    };
    self.restore(data);
    info!(path = %path.display(), "game loaded");
    self.say(events::MSG_LOADED);
    Ok(())
  }

  pub fn restore(&mut self, data: SaveData) {
    self.board = data.board;
    self.human = data.human;
    self.to_move = data.human;
    self.difficulty = data.difficulty;
    self.move_count = data.move_count;
    self.outcome = None;
    self.rebuild_library();
    self.emit(GameEvent::NewGame {
      dimension: self.board.size(),
      human: self.human,
    });
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  pub fn human(&self) -> Player {
    self.human
  }

  pub fn computer(&self) -> Player {
    self.human.other()
  }

  pub fn to_move(&self) -> Player {
    self.to_move
  }

  pub fn difficulty(&self) -> Difficulty {
    self.difficulty
  }

  pub fn move_count(&self) -> u32 {
    self.move_count
  }

  pub fn outcome(&self) -> Option<GameOutcome> {
    self.outcome
  }

  pub fn phase(&self) -> Phase {
    if self.outcome.is_some() {
      Phase::Won
    } else if self.board.is_full() {
      Phase::BoardFull
    } else if self.to_move == self.human {
      Phase::AwaitingHuman
    } else {
      Phase::ComputerMoving
    }
  }

  pub fn can_human_move(&self) -> bool {
    self.phase() == Phase::AwaitingHuman
  }

  pub fn snapshot(&self) -> GameSnapshot {
    GameSnapshot {
      board_size: self.board.size(),
      board: self.board.cells(),
      to_move: self.to_move,
      human: self.human,
      computer: self.computer(),
      difficulty: self.difficulty,
      move_count: self.move_count,
      phase: self.phase(),
      outcome: self.outcome,
      can_human_move: self.can_human_move(),
    }
  }
}
