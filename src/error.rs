use std::io;

/// Why a piece could not be placed.
#[derive(Debug, PartialEq, Eq)]
pub enum MoveError {
  OutOfBounds { x: i64, y: i64 },
  Occupied { x: usize, y: usize },
  NotYourTurn,
  GameOver,
}

impl std::error::Error for MoveError {}

impl std::fmt::Display for MoveError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      MoveError::OutOfBounds { x, y } => write!(f, "({}, {}) is outside the board", x, y),
      MoveError::Occupied { x, y } => write!(f, "({}, {}) is already occupied", x, y),
      MoveError::NotYourTurn => write!(f, "It is not the human player's turn"),
      MoveError::GameOver => write!(f, "The game is already finished"),
    }
  }
}

#[derive(Debug)]
pub enum SaveError {
  GameFinished,
  Io(io::Error),
}

impl std::error::Error for SaveError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SaveError::Io(err) => Some(err),
      SaveError::GameFinished => None,
    }
  }
}

impl std::fmt::Display for SaveError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SaveError::GameFinished => write!(f, "A finished game cannot be saved"),
      SaveError::Io(err) => write!(f, "Could not write the save file: {}", err),
    }
  }
}

#[derive(Debug)]
pub enum LoadError {
  NotFound,
  Malformed(String),
  Io(io::Error),
}

impl std::error::Error for LoadError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      LoadError::Io(err) => Some(err),
      _ => None,
    }
  }
}

impl std::fmt::Display for LoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      LoadError::NotFound => write!(f, "No save file was found"),
      LoadError::Malformed(reason) => write!(f, "The save file is corrupt: {}", reason),
      LoadError::Io(err) => write!(f, "Could not read the save file: {}", err),
    }
  }
}

impl From<io::Error> for LoadError {
  fn from(err: io::Error) -> Self {
    if err.kind() == io::ErrorKind::NotFound {
      LoadError::NotFound
    } else {
      LoadError::Io(err)
    }
  }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidDifficulty(pub u8);

impl std::error::Error for InvalidDifficulty {}

impl std::fmt::Display for InvalidDifficulty {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Difficulty must be between 0 and 3, got {}", self.0)
  }
}

#[derive(Debug)]
pub enum SettingsError {
  Io(io::Error),
  Parse(serde_json::Error),
}

impl std::error::Error for SettingsError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SettingsError::Io(err) => Some(err),
      SettingsError::Parse(err) => Some(err),
    }
  }
}

impl std::fmt::Display for SettingsError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SettingsError::Io(err) => write!(f, "Could not read settings: {}", err),
      SettingsError::Parse(err) => write!(f, "Could not parse settings: {}", err),
    }
  }
}
